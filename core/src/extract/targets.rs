use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named, runnable unit found in one configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    /// Literal script body (npm style). `None` when only a label exists.
    pub raw_value: Option<String>,
    pub source_offset: usize,
}

impl Target {
    pub fn new(name: impl Into<String>, source_offset: usize) -> Self {
        Self {
            name: name.into(),
            raw_value: None,
            source_offset,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.raw_value = Some(value.into());
        self
    }
}

/// Targets of one file keyed by name.
///
/// Iteration follows first-insertion order; re-inserting an existing name
/// replaces the stored target in place (last writer wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    items: Vec<Target>,
    index: HashMap<String, usize>,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: Target) {
        match self.index.get(&target.name) {
            Some(&i) => self.items[i] = target,
            None => {
                self.index.insert(target.name.clone(), self.items.len());
                self.items.push(target);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.name.as_str()).collect()
    }
}

impl IntoIterator for Targets {
    type Item = Target;
    type IntoIter = std::vec::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Target> for Targets {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut targets = Targets::new();
        for t in iter {
            targets.insert(t);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_replaces_in_place() {
        let mut t = Targets::new();
        t.insert(Target::new("build", 1).with_value("a"));
        t.insert(Target::new("test", 5).with_value("b"));
        t.insert(Target::new("build", 9).with_value("c"));

        assert_eq!(t.len(), 2);
        assert_eq!(t.names(), vec!["build", "test"]);
        assert_eq!(t.get("build").and_then(|x| x.raw_value.as_deref()), Some("c"));
        assert_eq!(t.get("build").map(|x| x.source_offset), Some(9));
    }
}
