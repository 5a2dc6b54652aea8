use std::collections::HashMap;

/// godot::register tool
pub struct Enemy {
    owner: godot::Node2D,
    pub loot: HashMap<String, i32>,
    #[godot(rset_type = "remote")]
    pub target: gdnative::Vector2,
}

impl Enemy {
    pub fn VProcess(&mut self, delta: f64) {}

    pub fn aim(&self) -> (f32, f32, f32) {
        (0.0, 0.0, 0.0)
    }
}
