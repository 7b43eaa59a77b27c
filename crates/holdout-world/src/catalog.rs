//! Static item catalog: weapons, food, and medical supplies.
//!
//! Inventories map free-form item names to quantities (locations may
//! stock anything), but the consumption and combat rules only understand
//! the items listed here. Food is ranked best-first by hunger recovery
//! so automatic consumption picks the most filling item available.

use std::collections::BTreeMap;

use holdout_types::{Weapon, WeaponKind};

/// One food item's effects when eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSpec {
    /// Catalog item name.
    pub name: &'static str,
    /// Hunger removed when eaten.
    pub hunger_recovery: f64,
    /// Happiness granted when eaten.
    pub happiness_bonus: f64,
}

/// One medical item's effects when used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedicalSpec {
    /// Catalog item name.
    pub name: &'static str,
    /// Energy restored when used.
    pub energy_recovery: f64,
}

/// Edible items, ranked best-first by hunger recovery.
pub const FOODS: &[FoodSpec] = &[
    FoodSpec {
        name: "rice ball",
        hunger_recovery: 40.0,
        happiness_bonus: 0.0,
    },
    FoodSpec {
        name: "bread",
        hunger_recovery: 30.0,
        happiness_bonus: 0.0,
    },
    FoodSpec {
        name: "fruit juice",
        hunger_recovery: 20.0,
        happiness_bonus: 5.0,
    },
    FoodSpec {
        name: "water",
        hunger_recovery: 10.0,
        happiness_bonus: 0.0,
    },
    FoodSpec {
        name: "energy drink",
        hunger_recovery: 5.0,
        happiness_bonus: 10.0,
    },
];

/// Medical supplies usable when energy runs low.
pub const MEDICAL_SUPPLIES: &[MedicalSpec] = &[MedicalSpec {
    name: "first aid kit",
    energy_recovery: 40.0,
}];

/// Look up a food item by name.
pub fn food_by_name(name: &str) -> Option<&'static FoodSpec> {
    FOODS.iter().find(|f| f.name == name)
}

/// Find the best food the inventory holds, by catalog ranking.
pub fn best_food_in_inventory(inventory: &BTreeMap<String, u32>) -> Option<&'static FoodSpec> {
    FOODS
        .iter()
        .find(|f| inventory.get(f.name).copied().unwrap_or(0) > 0)
}

/// Find the first medical item the inventory holds.
pub fn medical_in_inventory(inventory: &BTreeMap<String, u32>) -> Option<&'static MedicalSpec> {
    MEDICAL_SUPPLIES
        .iter()
        .find(|m| inventory.get(m.name).copied().unwrap_or(0) > 0)
}

/// Construct a standard-issue weapon by name.
///
/// Returns `None` for names outside the armory.
pub fn weapon_by_name(name: &str) -> Option<Weapon> {
    match name {
        "knife" => Some(Weapon {
            name: "knife".to_owned(),
            damage: 10.0,
            range: 5.0,
            kind: WeaponKind::Melee,
        }),
        "katana" => Some(Weapon {
            name: "katana".to_owned(),
            damage: 25.0,
            range: 7.0,
            kind: WeaponKind::Melee,
        }),
        "pistol" => Some(Weapon {
            name: "pistol".to_owned(),
            damage: 20.0,
            range: 50.0,
            kind: WeaponKind::Ranged,
        }),
        "rifle" => Some(Weapon {
            name: "rifle".to_owned(),
            damage: 40.0,
            range: 100.0,
            kind: WeaponKind::Ranged,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foods_are_ranked_best_first() {
        let mut previous = f64::INFINITY;
        for food in FOODS {
            assert!(food.hunger_recovery <= previous);
            previous = food.hunger_recovery;
        }
    }

    #[test]
    fn best_food_prefers_higher_recovery() {
        let mut inventory = BTreeMap::new();
        inventory.insert("water".to_owned(), 3);
        inventory.insert("bread".to_owned(), 1);
        let best = best_food_in_inventory(&inventory);
        assert_eq!(best.map(|f| f.name), Some("bread"));
    }

    #[test]
    fn zero_quantity_food_is_ignored() {
        let mut inventory = BTreeMap::new();
        inventory.insert("bread".to_owned(), 0);
        inventory.insert("water".to_owned(), 2);
        let best = best_food_in_inventory(&inventory);
        assert_eq!(best.map(|f| f.name), Some("water"));
    }

    #[test]
    fn empty_inventory_has_no_food_or_medicine() {
        let inventory = BTreeMap::new();
        assert!(best_food_in_inventory(&inventory).is_none());
        assert!(medical_in_inventory(&inventory).is_none());
    }

    #[test]
    fn armory_contents() {
        let pistol = weapon_by_name("pistol");
        assert!(pistol.is_some());
        if let Some(w) = pistol {
            assert!((w.damage - 20.0).abs() < f64::EPSILON);
            assert!((w.range - 50.0).abs() < f64::EPSILON);
            assert_eq!(w.kind, WeaponKind::Ranged);
        }
        assert!(weapon_by_name("crowbar").is_none());
    }
}
