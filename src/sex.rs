//! # Sex categories
//!
//! Interning table mapping caller-defined sex category names (`M`, `F`, `*`, ...) to
//! dense, 0-based ids in order of first appearance.
use std::collections::HashMap;

use log::debug;

#[derive(Debug, Default, Clone)]
pub struct SexRegistry {
    id2sex: Vec<String>,
    sex2id: HashMap<String, usize>,
}

impl SexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, registering it with the next free id if it was not seen before.
    pub fn lookup_or_create(&mut self, name: &str) -> usize {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = self.id2sex.len();
        debug!("Registered sex category '{name}' with id {id}");
        self.id2sex.push(name.to_owned());
        self.sex2id.insert(name.to_owned(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.sex2id.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.id2sex.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id2sex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2sex.is_empty()
    }

    /// Registered names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.id2sex.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_in_first_seen_order() {
        let mut reg = SexRegistry::new();
        assert_eq!(0, reg.lookup_or_create("M"));
        assert_eq!(1, reg.lookup_or_create("F"));
        assert_eq!(0, reg.lookup_or_create("M"));
        assert_eq!(2, reg.lookup_or_create("*"));
        assert_eq!(3, reg.len());
        assert_eq!(vec!["M", "F", "*"], reg.names().collect::<Vec<_>>());
    }

    #[test]
    fn lookup_does_not_register() {
        let mut reg = SexRegistry::new();
        assert_eq!(None, reg.lookup("M"));
        assert!(reg.is_empty());
        reg.lookup_or_create("M");
        assert_eq!(Some(0), reg.lookup("M"));
        // exact match only
        assert_eq!(None, reg.lookup("m"));
    }

    #[test]
    fn name_out_of_range() {
        let mut reg = SexRegistry::new();
        reg.lookup_or_create("F");
        assert_eq!(Some("F"), reg.name(0));
        assert_eq!(None, reg.name(1));
    }
}
