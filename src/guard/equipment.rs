//! Equipment policy: what to wear, what to wield, what to take home

use crate::entity::{Container, GuardAgent, Inventory, ItemStack};

/// Result of a restock scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestockReport {
    pub armor_taken: usize,
    pub weapon_taken: bool,
}

/// Re-derive worn armor from the inventory
///
/// Clears all four slots, then equips the first armor piece found for each
/// slot in inventory order. Empty stacks are purged along the way.
pub fn update_armor(agent: &mut GuardAgent) {
    agent.armor.clear();

    for index in 0..agent.inventory.size() {
        let Some(stack) = agent.inventory.get(index) else {
            continue;
        };
        if stack.is_empty() {
            agent.inventory.set(index, None);
            continue;
        }
        if let Some(slot) = stack.armor_slot() {
            if agent.armor.get(slot).is_none() {
                let piece = stack.clone();
                agent.armor.set(slot, Some(piece));
            }
        }
    }
}

/// Wield the first inventory item matching `predicate`; false if none
pub fn wield_first(agent: &mut GuardAgent, predicate: fn(&ItemStack) -> bool) -> bool {
    if agent.is_wielding(predicate) {
        return true;
    }
    match agent.inventory.find_first(predicate) {
        Some(slot) => {
            agent.set_held_slot(Some(slot));
            true
        }
        None => false,
    }
}

/// Move what the guard is missing from home storage into its inventory
///
/// Armor is taken for every slot the inventory has nothing for; one weapon
/// matching `weapon` is taken if the inventory holds none. Everything else,
/// and anything that does not fit, stays in storage.
pub fn withdraw_supplies(
    inventory: &mut Inventory,
    storage: &mut Inventory,
    weapon: fn(&ItemStack) -> bool,
) -> RestockReport {
    let mut report = RestockReport::default();

    for index in 0..storage.size() {
        let Some(stack) = storage.get(index) else {
            continue;
        };

        let wanted = match stack.armor_slot() {
            Some(slot) => !inventory.contains(|s| s.armor_slot() == Some(slot)),
            None => weapon(stack) && !inventory.contains(weapon),
        };
        if !wanted || inventory.first_empty_slot().is_none() {
            continue;
        }

        if let Some(stack) = storage.take(index) {
            let is_armor = stack.armor_slot().is_some();
            match inventory.insert(stack) {
                Ok(_) if is_armor => report.armor_taken += 1,
                Ok(_) => report.weapon_taken = true,
                Err(stack) => storage.set(index, Some(stack)),
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::entity::ArmorSlot;
    use proptest::prelude::*;

    fn guard_with(items: Vec<ItemStack>) -> GuardAgent {
        GuardAgent::new("Hale", Position::ZERO).with_inventory(Inventory::with_items(8, items))
    }

    #[test]
    fn test_first_piece_per_slot_wins() {
        let mut agent = guard_with(vec![
            ItemStack::armor("leather cap", ArmorSlot::Head),
            ItemStack::armor("iron helmet", ArmorSlot::Head),
            ItemStack::armor("boots", ArmorSlot::Feet),
        ]);

        update_armor(&mut agent);

        assert_eq!(agent.armor.get(ArmorSlot::Head).map(|s| s.name.as_str()), Some("leather cap"));
        assert!(agent.armor.get(ArmorSlot::Feet).is_some());
        assert!(agent.armor.get(ArmorSlot::Chest).is_none());
        // Later duplicate stays in the inventory
        assert_eq!(agent.inventory.get(1).map(|s| s.name.as_str()), Some("iron helmet"));
    }

    #[test]
    fn test_update_armor_drops_removed_pieces() {
        let mut agent = guard_with(vec![ItemStack::armor("vest", ArmorSlot::Chest)]);
        update_armor(&mut agent);
        assert_eq!(agent.armor.worn_count(), 1);

        agent.inventory.set(0, None);
        update_armor(&mut agent);
        assert_eq!(agent.armor.worn_count(), 0);
    }

    #[test]
    fn test_update_armor_purges_empty_stacks() {
        let mut agent = guard_with(vec![ItemStack::arrows(0), ItemStack::arrows(4)]);
        update_armor(&mut agent);
        assert!(agent.inventory.get(0).is_none());
        assert!(agent.inventory.get(1).is_some());
    }

    #[test]
    fn test_wield_first_prefers_current_hand() {
        let mut agent = guard_with(vec![ItemStack::bow(10), ItemStack::bow(20)]);
        agent.set_held_slot(Some(1));
        assert!(wield_first(&mut agent, ItemStack::is_launcher));
        assert_eq!(agent.held_slot(), Some(1));

        let mut unarmed = guard_with(vec![ItemStack::arrows(3)]);
        assert!(!wield_first(&mut unarmed, ItemStack::serves_as_weapon));
        assert!(unarmed.held_item().is_none());
    }

    #[test]
    fn test_withdraw_takes_missing_armor_only() {
        let mut inventory = Inventory::with_items(4, [ItemStack::armor("cap", ArmorSlot::Head)]);
        let mut storage = Inventory::with_items(
            6,
            [
                ItemStack::armor("helmet", ArmorSlot::Head),
                ItemStack::armor("chestplate", ArmorSlot::Chest),
                ItemStack::new("bread", crate::entity::ItemKind::Other, 3),
                ItemStack::armor("second chestplate", ArmorSlot::Chest),
            ],
        );

        let report = withdraw_supplies(&mut inventory, &mut storage, ItemStack::serves_as_weapon);

        assert_eq!(report, RestockReport { armor_taken: 1, weapon_taken: false });
        assert!(storage.get(0).is_some());
        assert!(storage.get(1).is_none());
        assert!(storage.get(2).is_some());
        assert!(storage.get(3).is_some());
        assert_eq!(inventory.occupied(), 2);
    }

    #[test]
    fn test_withdraw_takes_one_required_weapon() {
        let mut inventory = Inventory::new(4);
        let mut storage = Inventory::with_items(4, [ItemStack::sword("a", 4.0, 10), ItemStack::bow(30), ItemStack::bow(40)]);

        let report = withdraw_supplies(&mut inventory, &mut storage, ItemStack::is_launcher);

        assert!(report.weapon_taken);
        assert_eq!(inventory.get(0).map(|s| s.durability), Some(Some(30)));
        assert!(storage.get(0).is_some());
        assert!(storage.get(2).is_some());
    }

    #[test]
    fn test_withdraw_leaves_items_when_full() {
        let mut inventory = Inventory::with_items(1, [ItemStack::arrows(5)]);
        let mut storage = Inventory::with_items(2, [ItemStack::armor("boots", ArmorSlot::Feet)]);

        let report = withdraw_supplies(&mut inventory, &mut storage, ItemStack::serves_as_weapon);

        assert_eq!(report.armor_taken, 0);
        assert!(storage.get(0).is_some());
    }

    fn arb_stack() -> impl Strategy<Value = Option<ItemStack>> {
        prop_oneof![
            Just(None),
            (0usize..4).prop_map(|i| Some(ItemStack::armor(format!("piece{i}"), ArmorSlot::ALL[i]))),
            (0u32..3).prop_map(|n| Some(ItemStack::arrows(n))),
            Just(Some(ItemStack::sword("sword", 5.0, 10))),
        ]
    }

    proptest! {
        #[test]
        fn update_armor_is_idempotent(slots in proptest::collection::vec(arb_stack(), 0..12)) {
            let mut agent = GuardAgent::new("Ivo", Position::ZERO)
                .with_inventory(Inventory::with_items(12, slots.into_iter().flatten()));

            update_armor(&mut agent);
            let first = agent.armor.clone();
            update_armor(&mut agent);

            prop_assert_eq!(first, agent.armor.clone());
        }
    }
}
