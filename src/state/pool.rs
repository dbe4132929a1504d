//! Selectable item pool.
//!
//! The pool keeps items in their original order. Items that share a group
//! key leave the pool together.

use std::collections::HashSet;

/// An item that can be drafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableItem {
    /// Display name, unique within a pool
    pub name: String,

    /// Group key; grouped items are drafted as one unit
    pub group: Option<String>,
}

impl SelectableItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
        }
    }

    pub fn grouped(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Some(group.into()),
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({ "name": self.name });
        if let Some(group) = &self.group {
            obj["group"] = serde_json::json!(group);
        }
        obj
    }
}

/// Ordered pool of items still available.
#[derive(Debug, Clone, Default)]
pub struct ItemPool {
    items: Vec<SelectableItem>,
}

impl ItemPool {
    pub fn new(items: Vec<SelectableItem>) -> Self {
        Self { items }
    }

    /// Check that names are non-blank and unique.
    pub fn validate(items: &[SelectableItem]) -> Result<(), String> {
        let mut seen = HashSet::new();
        for item in items {
            if item.name.trim().is_empty() {
                return Err("item names must not be blank".to_string());
            }
            if !seen.insert(item.name.as_str()) {
                return Err(format!("duplicate item: {}", item.name));
            }
        }
        Ok(())
    }

    /// Look up an item by name.
    pub fn get(&self, name: &str) -> Option<&SelectableItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an item, plus every item in its group.
    ///
    /// Returns the removed items in pool order, or `None` when the name is
    /// not in the pool (the pool is untouched).
    pub fn take(&mut self, name: &str) -> Option<Vec<SelectableItem>> {
        let group = self.get(name)?.group.clone();

        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| match &group {
                Some(g) => item.group.as_ref() == Some(g),
                None => item.name == name,
            });
        self.items = kept;

        Some(taken)
    }

    /// Items still in the pool, in order.
    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remaining names, one per line.
    pub fn export_text(&self) -> String {
        self.names().collect::<Vec<_>>().join("\n")
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(|i| i.to_json()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_pool() -> ItemPool {
        ItemPool::new(vec![
            SelectableItem::new("P1"),
            SelectableItem::grouped("P2", "g1"),
            SelectableItem::new("P3"),
            SelectableItem::grouped("P4", "g1"),
            SelectableItem::grouped("P5", "g2"),
        ])
    }

    #[test]
    fn test_take_single() {
        let mut pool = make_pool();
        let taken = pool.take("P3").unwrap();
        assert_eq!(taken, vec![SelectableItem::new("P3")]);
        assert_eq!(pool.names().collect::<Vec<_>>(), vec!["P1", "P2", "P4", "P5"]);
    }

    #[test]
    fn test_take_group_in_pool_order() {
        let mut pool = make_pool();

        // Picking the later brother still returns pool order
        let taken = pool.take("P4").unwrap();
        let names: Vec<_> = taken.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["P2", "P4"]);
        assert_eq!(pool.names().collect::<Vec<_>>(), vec!["P1", "P3", "P5"]);
    }

    #[test]
    fn test_take_missing_leaves_pool() {
        let mut pool = make_pool();
        assert!(pool.take("nobody").is_none());
        assert_eq!(pool.len(), 5);

        pool.take("P1").unwrap();
        assert!(pool.take("P1").is_none());
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_group_of_one() {
        let mut pool = make_pool();
        let taken = pool.take("P5").unwrap();
        assert_eq!(taken.len(), 1);
        assert!(taken[0].is_grouped());
    }

    #[test]
    fn test_validate() {
        assert!(ItemPool::validate(make_pool().items()).is_ok());
        assert!(ItemPool::validate(&[SelectableItem::new(" ")]).is_err());
        assert!(ItemPool::validate(&[SelectableItem::new("A"), SelectableItem::grouped("A", "g")])
            .is_err());
    }

    #[test]
    fn test_export_text() {
        let mut pool = make_pool();
        pool.take("P2").unwrap();
        assert_eq!(pool.export_text(), "P1\nP3\nP5");
        assert_eq!(ItemPool::default().export_text(), "");
    }
}
