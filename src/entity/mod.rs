pub mod agent;
pub mod candidate;
pub mod inventory;
pub mod item;

pub use agent::{ArmorSet, GuardAgent};
pub use candidate::{CreatureAttribute, EntityKind, TargetCandidate};
pub use inventory::{Container, Inventory};
pub use item::{ArmorSlot, Enchantments, ItemKind, ItemStack, WeaponClass};
