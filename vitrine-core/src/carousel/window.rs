use vitrine_model::{Item, ItemList};

use super::types::WINDOW_SIZE;

/// Fixed spatial slot on the gallery walls.
///
/// Slots never move; navigation only changes which item each one shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Left,
    Center,
    Right,
}

impl Slot {
    pub const ALL: [Slot; WINDOW_SIZE] = [Slot::Left, Slot::Center, Slot::Right];

    /// Offset from the window start shown by this slot.
    pub const fn position(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Center => 1,
            Slot::Right => 2,
        }
    }
}

/// One occupied slot of the window.
#[derive(Debug, Clone, Copy)]
pub struct WindowEntry<'a> {
    pub slot: Slot,
    /// Index of `item` in the list (already reduced modulo the length).
    pub index: usize,
    pub item: &'a Item,
}

/// The three items currently bound to the walls.
///
/// Derived from the start index on demand; an empty list yields an empty
/// window, a list shorter than three repeats items across slots.
#[derive(Debug, Clone, Copy)]
pub struct CarouselWindow<'a> {
    start_index: usize,
    entries: Option<[WindowEntry<'a>; WINDOW_SIZE]>,
}

impl<'a> CarouselWindow<'a> {
    pub fn new(items: &'a ItemList, start_index: usize) -> Self {
        let len = items.len();
        let entries = (len > 0).then(|| {
            Slot::ALL.map(|slot| {
                let index = (start_index + slot.position()) % len;
                WindowEntry {
                    slot,
                    index,
                    item: &items[index],
                }
            })
        });
        Self {
            start_index,
            entries,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_none()
    }

    pub fn len(&self) -> usize {
        if self.entries.is_some() { WINDOW_SIZE } else { 0 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry<'a>> + '_ {
        self.entries.iter().flatten()
    }

    pub fn get(&self, slot: Slot) -> Option<&WindowEntry<'a>> {
        self.entries.as_ref().map(|entries| &entries[slot.position()])
    }

    /// List indices shown in slot order, if any.
    pub fn indices(&self) -> Option<[usize; WINDOW_SIZE]> {
        self.entries.map(|entries| entries.map(|entry| entry.index))
    }
}
