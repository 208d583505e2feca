//! Per-side item inventory.

use std::collections::BTreeMap;

/// Item quantities keyed by item id.
///
/// Keys never hold a zero quantity: consuming the last unit removes the key.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with_item(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.add(item, quantity);
        self
    }

    pub fn add(&mut self, item: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item.into()).or_insert(0) += quantity;
    }

    pub fn quantity(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.quantity(item) > 0
    }

    /// Removes one unit. Returns false if none was available.
    pub fn consume(&mut self, item: &str) -> bool {
        let Some(quantity) = self.items.get_mut(item) else {
            return false;
        };
        *quantity -= 1;
        if *quantity == 0 {
            self.items.remove(item);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for (item, quantity) in iter {
            inventory.add(item, quantity);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consuming_last_unit_removes_key() {
        let mut inventory = Inventory::new().with_item("net", 1);
        assert!(inventory.consume("net"));
        assert_eq!(inventory.quantity("net"), 0);
        assert!(inventory.iter().next().is_none());
        assert!(!inventory.consume("net"));
    }

    #[test]
    fn zero_quantity_is_never_stored() {
        let mut inventory = Inventory::new();
        inventory.add("potion", 0);
        assert!(inventory.is_empty());

        let inventory: Inventory = [("potion", 2), ("potion", 1)].into_iter().collect();
        assert_eq!(inventory.quantity("potion"), 3);
    }
}
