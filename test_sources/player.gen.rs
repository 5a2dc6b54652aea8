// Generated registration glue. Never scanned.

#[no_mangle]
pub extern "C" fn godot_nativescript_init(handle: *mut std::ffi::c_void) {
    native_script_init_player(handle);
    native_script_init_enemy(handle);
}
