//! The guard agent - the entity the state machine drives
//!
//! The agent is owned by the host simulation and handed to the state machine
//! each tick. It is the single source of truth for position, equipment and
//! inventory.

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingId, ColonyId, EntityId, Position};
use crate::entity::inventory::{Container, Inventory};
use crate::entity::item::{ArmorSlot, ItemStack};

/// Standard inventory size for a citizen
pub const DEFAULT_INVENTORY_SIZE: usize = 27;

/// Eye height of a citizen above its feet
pub const DEFAULT_EYE_HEIGHT: f64 = 1.62;

/// Worn armor pieces, one per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorSet {
    head: Option<ItemStack>,
    chest: Option<ItemStack>,
    legs: Option<ItemStack>,
    feet: Option<ItemStack>,
}

impl ArmorSet {
    pub fn get(&self, slot: ArmorSlot) -> Option<&ItemStack> {
        match slot {
            ArmorSlot::Head => self.head.as_ref(),
            ArmorSlot::Chest => self.chest.as_ref(),
            ArmorSlot::Legs => self.legs.as_ref(),
            ArmorSlot::Feet => self.feet.as_ref(),
        }
    }

    pub fn set(&mut self, slot: ArmorSlot, stack: Option<ItemStack>) {
        let target = match slot {
            ArmorSlot::Head => &mut self.head,
            ArmorSlot::Chest => &mut self.chest,
            ArmorSlot::Legs => &mut self.legs,
            ArmorSlot::Feet => &mut self.feet,
        };
        *target = stack;
    }

    pub fn clear(&mut self) {
        for slot in ArmorSlot::ALL {
            self.set(slot, None);
        }
    }

    pub fn worn_count(&self) -> usize {
        ArmorSlot::ALL.iter().filter(|&&slot| self.get(slot).is_some()).count()
    }
}

/// A colony guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardAgent {
    pub id: EntityId,
    pub name: String,
    /// Feet position
    pub position: Position,
    pub eye_height: f64,
    pub experience_level: u32,
    pub experience: f64,
    pub intelligence: i32,
    pub strength: i32,
    pub skill_modifier: i32,
    pub can_pick_up_loot: bool,
    /// Inventory slot of the wielded item
    held_slot: Option<usize>,
    pub armor: ArmorSet,
    pub inventory: Inventory,
    pub colony: Option<ColonyId>,
    /// The guard's own post, used for restocking and as patrol fallback
    pub home: Option<BuildingId>,
    pub move_speed: f64,
    pub alive: bool,
    pub burning: bool,
}

impl GuardAgent {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            position,
            eye_height: DEFAULT_EYE_HEIGHT,
            experience_level: 0,
            experience: 0.0,
            intelligence: 0,
            strength: 0,
            skill_modifier: 0,
            can_pick_up_loot: false,
            held_slot: None,
            armor: ArmorSet::default(),
            inventory: Inventory::new(DEFAULT_INVENTORY_SIZE),
            colony: None,
            home: None,
            move_speed: 1.0,
            alive: true,
            burning: false,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.experience_level = level;
        self
    }

    pub fn with_stats(mut self, intelligence: i32, strength: i32) -> Self {
        self.intelligence = intelligence;
        self.strength = strength;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self.held_slot = None;
        self
    }

    /// Enlist the guard in a colony with its own post
    pub fn stationed_at(mut self, colony: ColonyId, home: BuildingId) -> Self {
        self.colony = Some(colony);
        self.home = Some(home);
        self
    }

    pub fn eye_position(&self) -> Position {
        self.position + Position::new(0.0, self.eye_height, 0.0)
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        self.position.distance(other)
    }

    /// The wielded stack, resolved against the inventory
    pub fn held_item(&self) -> Option<&ItemStack> {
        self.held_slot.and_then(|slot| self.inventory.get(slot))
    }

    pub fn held_slot(&self) -> Option<usize> {
        self.held_item().and(self.held_slot)
    }

    /// Wield the stack in `slot`; `None` empties the hand
    pub fn set_held_slot(&mut self, slot: Option<usize>) {
        self.held_slot = slot;
    }

    pub fn is_wielding(&self, predicate: impl Fn(&ItemStack) -> bool) -> bool {
        self.held_item().map(predicate).unwrap_or(false)
    }

    /// Wear down the wielded item; a broken item leaves the inventory
    pub fn damage_item_in_hand(&mut self, amount: u32) {
        let Some(slot) = self.held_slot else {
            return;
        };
        let broke = match self.inventory.get_mut(slot) {
            Some(stack) => stack.wear(amount),
            None => false,
        };
        if broke {
            self.inventory.set(slot, None);
            self.held_slot = None;
        }
    }

    pub fn add_experience(&mut self, xp: f64) {
        self.experience += xp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_item_follows_inventory_slot() {
        let mut agent = GuardAgent::new("Aldo", Position::ZERO)
            .with_inventory(Inventory::with_items(4, [ItemStack::arrows(2), ItemStack::bow(10)]));
        assert!(agent.held_item().is_none());

        agent.set_held_slot(Some(1));
        assert!(agent.is_wielding(ItemStack::is_launcher));

        agent.inventory.set(1, None);
        assert!(agent.held_item().is_none());
        assert_eq!(agent.held_slot(), None);
    }

    #[test]
    fn test_broken_weapon_leaves_hand() {
        let mut agent = GuardAgent::new("Berta", Position::ZERO)
            .with_inventory(Inventory::with_items(2, [ItemStack::sword("old sword", 4.0, 1)]));
        agent.set_held_slot(Some(0));

        agent.damage_item_in_hand(1);

        assert!(agent.held_item().is_none());
        assert!(agent.inventory.get(0).is_none());
    }

    #[test]
    fn test_armor_set_by_slot() {
        let mut armor = ArmorSet::default();
        armor.set(ArmorSlot::Legs, Some(ItemStack::armor("greaves", ArmorSlot::Legs)));
        assert_eq!(armor.worn_count(), 1);
        assert!(armor.get(ArmorSlot::Legs).is_some());

        armor.clear();
        assert_eq!(armor.worn_count(), 0);
    }

    #[test]
    fn test_eye_position_above_feet() {
        let agent = GuardAgent::new("Cato", Position::new(1.0, 64.0, 1.0));
        assert!((agent.eye_position().y - (64.0 + DEFAULT_EYE_HEIGHT)).abs() < 1e-9);
    }
}
