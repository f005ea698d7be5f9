//! Paper doll and bag

use crate::error::EquipError;
use item_core::{EquipSlot, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of bag slots on every unit
pub const BAG_SIZE: usize = 16;

/// Equipped items by slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipSlot, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn slots(&self) -> &BTreeMap<EquipSlot, Item> {
        &self.slots
    }

    /// Place an item, returning whatever was in the slot
    pub fn put(&mut self, slot: EquipSlot, item: Item) -> Option<Item> {
        self.slots.insert(slot, item)
    }

    pub fn take(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    pub fn main_hand(&self) -> Option<&Item> {
        self.get(EquipSlot::MainHand)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Fixed-size bag of optional items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Inventory {
            slots: vec![None; BAG_SIZE],
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    /// Index of the first empty slot
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Put an item in the first free slot
    pub fn add(&mut self, item: Item) -> Result<usize, EquipError> {
        let index = self.first_free().ok_or(EquipError::InventoryFull)?;
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Remove and return the item at `index`
    pub fn take(&mut self, index: usize) -> Result<Item, EquipError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EquipError::BagIndexOutOfRange(index))?;
        slot.take().ok_or(EquipError::EmptyBagSlot(index))
    }

    /// Store an item at a specific index, which must be empty
    fn put(&mut self, index: usize, item: Item) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(item);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Move a bag item onto the paper doll, swapping out any item already in
/// that slot. Returns the slot used.
pub fn equip_from_bag(
    equipment: &mut Equipment,
    inventory: &mut Inventory,
    bag_index: usize,
) -> Result<EquipSlot, EquipError> {
    let slot = {
        let item = match inventory.slots.get(bag_index) {
            None => return Err(EquipError::BagIndexOutOfRange(bag_index)),
            Some(None) => return Err(EquipError::EmptyBagSlot(bag_index)),
            Some(Some(item)) => item,
        };
        item.slot
            .ok_or_else(|| EquipError::InvalidSlot(item.name.clone()))?
    };

    let item = inventory.take(bag_index)?;
    if let Some(previous) = equipment.put(slot, item) {
        // The bag slot we just emptied always has room for the swap
        inventory.put(bag_index, previous);
    }
    Ok(slot)
}

/// Move an equipped item into the first free bag slot
pub fn unequip(
    equipment: &mut Equipment,
    inventory: &mut Inventory,
    slot: EquipSlot,
) -> Result<usize, EquipError> {
    if equipment.get(slot).is_none() {
        return Err(EquipError::EmptyEquipSlot(slot));
    }
    let index = inventory.first_free().ok_or(EquipError::InventoryFull)?;
    let item = equipment.take(slot).ok_or(EquipError::EmptyEquipSlot(slot))?;
    inventory.put(index, item);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::ItemRegistry;

    fn item(id: u32) -> Item {
        let registry = ItemRegistry::builtin();
        Item::with_uid(registry.get(id).unwrap(), id as u64)
    }

    fn pebble() -> Item {
        let mut item = item(5);
        item.slot = None;
        item.name = "Pebble".to_string();
        item
    }

    #[test]
    fn test_equip_moves_item() {
        let mut equipment = Equipment::new();
        let mut bag = Inventory::new();
        bag.add(item(1)).unwrap();

        let slot = equip_from_bag(&mut equipment, &mut bag, 0).unwrap();
        assert_eq!(slot, EquipSlot::MainHand);
        assert!(bag.is_empty());
        assert_eq!(equipment.main_hand().unwrap().template_id, 1);
    }

    #[test]
    fn test_equip_swaps_into_same_bag_slot() {
        let mut equipment = Equipment::new();
        let mut bag = Inventory::new();
        equipment.put(EquipSlot::MainHand, item(1));
        bag.add(item(3)).unwrap();
        bag.add(item(101)).unwrap();

        equip_from_bag(&mut equipment, &mut bag, 1).unwrap();
        assert_eq!(equipment.main_hand().unwrap().template_id, 101);
        assert_eq!(bag.get(1).unwrap().template_id, 1);
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_equip_errors_leave_state() {
        let mut equipment = Equipment::new();
        let mut bag = Inventory::new();
        bag.add(pebble()).unwrap();

        assert_eq!(
            equip_from_bag(&mut equipment, &mut bag, 0),
            Err(EquipError::InvalidSlot("Pebble".to_string()))
        );
        assert_eq!(
            equip_from_bag(&mut equipment, &mut bag, 3),
            Err(EquipError::EmptyBagSlot(3))
        );
        assert_eq!(
            equip_from_bag(&mut equipment, &mut bag, BAG_SIZE),
            Err(EquipError::BagIndexOutOfRange(BAG_SIZE))
        );
        assert_eq!(bag.len(), 1);
        assert!(equipment.is_empty());
    }

    #[test]
    fn test_unequip_full_bag() {
        let mut equipment = Equipment::new();
        let mut bag = Inventory::new();
        equipment.put(EquipSlot::Head, item(3));
        for _ in 0..BAG_SIZE {
            bag.add(item(4)).unwrap();
        }

        assert_eq!(
            unequip(&mut equipment, &mut bag, EquipSlot::Head),
            Err(EquipError::InventoryFull)
        );
        assert!(equipment.get(EquipSlot::Head).is_some());
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut equipment = Equipment::new();
        let mut bag = Inventory::new();
        assert_eq!(
            unequip(&mut equipment, &mut bag, EquipSlot::Neck),
            Err(EquipError::EmptyEquipSlot(EquipSlot::Neck))
        );
    }
}
