//! Items a guard can carry, wield, or wear
//!
//! Item kinds are resolved once when a stack is created, so policy code
//! matches on `ItemKind` instead of probing item types at every decision.

use serde::{Deserialize, Serialize};

/// The four wearable armor slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Feet,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 4] = [
        ArmorSlot::Head,
        ArmorSlot::Chest,
        ArmorSlot::Legs,
        ArmorSlot::Feet,
    ];
}

/// Weapon families; only swords add their own attack damage to a swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Sword,
    Axe,
    Tool,
}

/// Closed capability tag for an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Armor { slot: ArmorSlot },
    Weapon { class: WeaponClass, attack_damage: f64 },
    /// Ammunition launcher (bow)
    Launcher,
    Ammo,
    Other,
}

/// Enchantment levels carried by a stack (0 = absent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enchantments {
    pub sharpness: u8,
    pub smite: u8,
    pub bane_of_arthropods: u8,
    pub fire_aspect: u8,
    pub power: u8,
    pub punch: u8,
    pub flame: u8,
}

impl Enchantments {
    pub fn none() -> Self {
        Self::default()
    }
}

/// A stack of items in a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub name: String,
    pub kind: ItemKind,
    pub count: u32,
    /// Remaining uses; `None` for items that do not wear out
    pub durability: Option<u32>,
    pub enchantments: Enchantments,
}

impl ItemStack {
    pub fn new(name: impl Into<String>, kind: ItemKind, count: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            count,
            durability: None,
            enchantments: Enchantments::none(),
        }
    }

    pub fn sword(name: impl Into<String>, attack_damage: f64, durability: u32) -> Self {
        Self::new(
            name,
            ItemKind::Weapon { class: WeaponClass::Sword, attack_damage },
            1,
        )
        .with_durability(durability)
    }

    pub fn axe(name: impl Into<String>, attack_damage: f64, durability: u32) -> Self {
        Self::new(
            name,
            ItemKind::Weapon { class: WeaponClass::Axe, attack_damage },
            1,
        )
        .with_durability(durability)
    }

    /// Pickaxes, shovels and the like; hit with enchantments only
    pub fn tool(name: impl Into<String>, attack_damage: f64, durability: u32) -> Self {
        Self::new(
            name,
            ItemKind::Weapon { class: WeaponClass::Tool, attack_damage },
            1,
        )
        .with_durability(durability)
    }

    pub fn bow(durability: u32) -> Self {
        Self::new("bow", ItemKind::Launcher, 1).with_durability(durability)
    }

    pub fn armor(name: impl Into<String>, slot: ArmorSlot) -> Self {
        Self::new(name, ItemKind::Armor { slot }, 1)
    }

    pub fn arrows(count: u32) -> Self {
        Self::new("arrow", ItemKind::Ammo, count)
    }

    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = Some(durability);
        self
    }

    pub fn with_enchantments(mut self, enchantments: Enchantments) -> Self {
        self.enchantments = enchantments;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn armor_slot(&self) -> Option<ArmorSlot> {
        match self.kind {
            ItemKind::Armor { slot } => Some(slot),
            _ => None,
        }
    }

    /// Anything a melee guard can swing: swords, axes, tools
    pub fn serves_as_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn is_launcher(&self) -> bool {
        matches!(self.kind, ItemKind::Launcher)
    }

    /// Attack damage a sword adds on top of a swing; zero for everything else
    pub fn sword_damage(&self) -> f64 {
        match self.kind {
            ItemKind::Weapon { class: WeaponClass::Sword, attack_damage } => attack_damage,
            _ => 0.0,
        }
    }

    /// Wear the item down, returning true if it broke
    pub fn wear(&mut self, amount: u32) -> bool {
        match self.durability.as_mut() {
            Some(durability) => {
                *durability = durability.saturating_sub(amount);
                *durability == 0
            }
            None => false,
        }
    }
}
