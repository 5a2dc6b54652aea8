//! Registry - all registrable classes found by one scan.
//!
//! Classes keep their discovery order, which is the order generated
//! registration code runs in. A name index gives O(1) lookup.
//!
//! # Example
//!
//! ```
//! use gdnative_registry::{Registry, RegistryClass};
//!
//! let mut registry = Registry::new();
//! registry.insert(RegistryClass::new("Player", "Reference")).unwrap();
//!
//! assert_eq!(registry.get("Player").map(|c| c.base()), Some("Reference"));
//! assert!(registry.insert(RegistryClass::new("Player", "Node")).is_err());
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;

use gdnative_core::{ScanError, ScanResult};

use crate::entries::RegistryClass;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    classes: Vec<RegistryClass>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Class names are unique.
    pub fn insert(&mut self, class: RegistryClass) -> ScanResult<()> {
        if self.index.contains_key(&class.name) {
            return Err(ScanError::DuplicateClass(class.name));
        }
        self.index.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegistryClass> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut RegistryClass> {
        self.index.get(name).map(|&i| &mut self.classes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Classes in discovery order.
    pub fn classes(&self) -> &[RegistryClass] {
        &self.classes
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryClass> {
        self.classes.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Generated init function names, one per class.
    pub fn init_functions(&self) -> Vec<String> {
        self.classes.iter().map(RegistryClass::init_function).collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a RegistryClass;
    type IntoIter = std::slice::Iter<'a, RegistryClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_discovery_order() {
        let mut registry = Registry::new();
        registry.insert(RegistryClass::new("Zombie", "Node")).unwrap();
        registry.insert(RegistryClass::new("Actor", "Node")).unwrap();

        assert_eq!(registry.names(), vec!["Zombie", "Actor"]);
        assert_eq!(
            registry.init_functions(),
            vec!["native_script_init_zombie", "native_script_init_actor"]
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rejects_duplicates() {
        let mut registry = Registry::new();
        registry.insert(RegistryClass::new("Player", "Node")).unwrap();
        assert_eq!(
            registry.insert(RegistryClass::new("Player", "Node2D")),
            Err(ScanError::DuplicateClass("Player".to_string()))
        );
        assert_eq!(registry.get("Player").map(|c| c.base()), Some("Node"));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut registry = Registry::new();
        registry.insert(RegistryClass::new("Player", "Node")).unwrap();
        registry.get_mut("Player").unwrap().tool = true;
        assert!(registry.get("Player").unwrap().is_tool());
        assert!(registry.get_mut("Missing").is_none());
    }

    #[test]
    fn serializes_classes_in_order() {
        let mut registry = Registry::new();
        registry.insert(RegistryClass::new("Player", "Reference")).unwrap();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["classes"][0]["name"], "Player");
        assert_eq!(json["classes"][0]["base"], "Reference");
        assert!(json.get("index").is_none());
    }
}
