//! Process-wide map of live instances created by generic constructors.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

/// Descriptor of a registered class, shared by all of its instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub base: String,
    pub tool: bool,
}

lazy_static! {
    static ref INSTANCES: Mutex<FxHashMap<String, Arc<ClassInfo>>> =
        Mutex::new(FxHashMap::default());
}

fn instances() -> MutexGuard<'static, FxHashMap<String, Arc<ClassInfo>>> {
    INSTANCES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Record a live instance.
pub fn insert(id: impl Into<String>, class: Arc<ClassInfo>) {
    instances().insert(id.into(), class);
}

/// Forget an instance, returning its class if it was live.
pub fn remove(id: &str) -> Option<Arc<ClassInfo>> {
    instances().remove(id)
}

/// Look up the class of a live instance.
pub fn get(id: &str) -> Option<Arc<ClassInfo>> {
    instances().get(id).cloned()
}

pub fn contains(id: &str) -> bool {
    instances().contains_key(id)
}

/// Number of live instances across all classes.
pub fn len() -> usize {
    instances().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let info = Arc::new(ClassInfo {
            name: "Tracked".to_string(),
            base: "Node".to_string(),
            tool: false,
        });
        insert("instances-test-1", info.clone());
        assert!(contains("instances-test-1"));
        assert_eq!(get("instances-test-1"), Some(info.clone()));
        assert_eq!(remove("instances-test-1"), Some(info));
        assert!(!contains("instances-test-1"));
        assert_eq!(remove("instances-test-1"), None);
    }
}
