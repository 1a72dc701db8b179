use std::{ops::Deref, sync::Arc};

use crate::item::Item;

/// Ordered, immutable sequence of gallery items.
///
/// Cloning is cheap; every holder shares the same storage. A list is only
/// ever replaced wholesale, never edited in place, so indices stay stable
/// for as long as a given list is in use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList(Arc<[Item]>);

impl ItemList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Item at `index` reduced modulo the list length.
    pub fn get_wrapped(&self, index: usize) -> Option<&Item> {
        if self.0.is_empty() {
            return None;
        }
        self.0.get(index % self.0.len())
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.0
    }
}

impl Deref for ItemList {
    type Target = [Item];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self(items.into())
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
