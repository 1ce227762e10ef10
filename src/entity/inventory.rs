//! Slot containers (guard inventory, building storage)

use serde::{Deserialize, Serialize};

use crate::entity::item::ItemStack;

/// Ordered, fixed-capacity slot storage
///
/// Equipment policy only ever reads slots in order, writes single slots and
/// asks for the first free one, so that is all a container has to offer.
pub trait Container {
    fn size(&self) -> usize;

    fn get(&self, index: usize) -> Option<&ItemStack>;

    fn set(&mut self, index: usize, stack: Option<ItemStack>);

    fn first_empty_slot(&self) -> Option<usize>;

    /// Remove and return the stack in a slot
    fn take(&mut self, index: usize) -> Option<ItemStack> {
        let stack = self.get(index).cloned();
        if stack.is_some() {
            self.set(index, None);
        }
        stack
    }

    /// Index of the first stack matching `predicate`
    fn find_first(&self, predicate: impl Fn(&ItemStack) -> bool) -> Option<usize>
    where
        Self: Sized,
    {
        (0..self.size()).find(|&i| self.get(i).map(&predicate).unwrap_or(false))
    }

    fn contains(&self, predicate: impl Fn(&ItemStack) -> bool) -> bool
    where
        Self: Sized,
    {
        self.find_first(predicate).is_some()
    }
}

/// Plain vector-backed container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Build an inventory holding `items` in the first slots
    pub fn with_items(capacity: usize, items: impl IntoIterator<Item = ItemStack>) -> Self {
        let mut inventory = Self::new(capacity);
        for item in items {
            if let Some(slot) = inventory.first_empty_slot() {
                inventory.slots[slot] = Some(item);
            }
        }
        inventory
    }

    pub fn slots(&self) -> impl Iterator<Item = Option<&ItemStack>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Put a stack in the first free slot, handing it back if full
    pub fn insert(&mut self, stack: ItemStack) -> Result<usize, ItemStack> {
        match self.first_empty_slot() {
            Some(slot) => {
                self.slots[slot] = Some(stack);
                Ok(slot)
            }
            None => Err(stack),
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Container for Inventory {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn set(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = stack;
        }
    }

    fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}
