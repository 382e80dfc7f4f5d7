//! Fixed-capacity registry of the ordered item sequence.

use core::fmt::Write;

use dualhunt_hal::{ObjectId, TargetHit, ViewMode};

use crate::error::HuntError;
use crate::view::required_view;

/// Maximum number of items in one hunt.
pub const MAX_ITEMS: usize = 32;
/// Maximum item name length in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Item name storage.
pub type ItemName = heapless::String<MAX_NAME_LEN>;

/// One collectible in the ordered sequence.
///
/// There is no per-item collected flag: an item is collected exactly when
/// its index is below the session cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    id: ObjectId,
    name: ItemName,
    index: usize,
}

impl Item {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn required_view(&self) -> ViewMode {
        required_view(self.index)
    }
}

/// Ordered item sequence, indexed by registration order.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    items: heapless::Vec<Item, MAX_ITEMS>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of `count` items with handles `0..count` and names `item-N`.
    pub fn numbered(count: usize) -> Result<Self, HuntError> {
        let mut registry = Self::new();
        for i in 0..count {
            let mut name = ItemName::new();
            write!(name, "item-{i}").map_err(|_| HuntError::NameTooLong { max: MAX_NAME_LEN })?;
            registry.register(ObjectId(i as u32), &name)?;
        }
        Ok(registry)
    }

    /// Append an item; its index is its position in registration order.
    pub fn register(&mut self, id: ObjectId, name: &str) -> Result<usize, HuntError> {
        if self.by_id(id).is_some() {
            return Err(HuntError::DuplicateItem(id));
        }
        let mut stored = ItemName::new();
        stored
            .push_str(name)
            .map_err(|_| HuntError::NameTooLong { max: MAX_NAME_LEN })?;

        let index = self.items.len();
        self.items
            .push(Item {
                id,
                name: stored,
                index,
            })
            .map_err(|_| HuntError::TooManyItems {
                capacity: MAX_ITEMS,
            })?;
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn by_id(&self, id: ObjectId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Item> {
        if name.is_empty() {
            return None;
        }
        self.items.iter().find(|item| item.name.as_str() == name)
    }

    /// Resolve a targeting hit to an item.
    ///
    /// The handle is authoritative. The name lookup is a legacy path for
    /// hit-test collaborators that report a different handle than the one
    /// registered (e.g. a child collider of the item).
    pub fn resolve(&self, hit: &TargetHit<'_>) -> Option<&Item> {
        self.by_id(hit.id).or_else(|| self.by_name(hit.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u32, name: &str) -> TargetHit<'_> {
        TargetHit {
            id: ObjectId(id),
            name,
            ready: false,
        }
    }

    #[test]
    fn numbered_assigns_ids_and_names() {
        let registry = ItemRegistry::numbered(3).unwrap();
        assert_eq!(registry.len(), 3);
        let item = registry.get(2).unwrap();
        assert_eq!(item.id(), ObjectId(2));
        assert_eq!(item.name(), "item-2");
        assert_eq!(item.index(), 2);
        assert_eq!(item.required_view(), ViewMode::A);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut registry = ItemRegistry::new();
        registry.register(ObjectId(7), "lamp").unwrap();
        assert_eq!(
            registry.register(ObjectId(7), "key"),
            Err(HuntError::DuplicateItem(ObjectId(7)))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn capacity_enforced() {
        let mut registry = ItemRegistry::numbered(MAX_ITEMS).unwrap();
        assert_eq!(
            registry.register(ObjectId(999), "extra"),
            Err(HuntError::TooManyItems {
                capacity: MAX_ITEMS
            })
        );
    }

    #[test]
    fn long_name_rejected() {
        let mut registry = ItemRegistry::new();
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            registry.register(ObjectId(1), &long),
            Err(HuntError::NameTooLong { max: MAX_NAME_LEN })
        );
    }

    #[test]
    fn resolve_prefers_id_then_name() {
        let mut registry = ItemRegistry::new();
        registry.register(ObjectId(10), "lamp").unwrap();
        registry.register(ObjectId(11), "key").unwrap();

        assert_eq!(registry.resolve(&hit(11, "lamp")).unwrap().name(), "key");
        assert_eq!(registry.resolve(&hit(99, "lamp")).unwrap().id(), ObjectId(10));
        assert!(registry.resolve(&hit(99, "")).is_none());
        assert!(registry.resolve(&hit(99, "anvil")).is_none());
    }
}
