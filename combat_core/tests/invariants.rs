//! Property tests for the invariants every tick must preserve

use combat_core::combat::{apply_damage, heal, mitigate};
use combat_core::config::CombatConstants;
use combat_core::prelude::*;
use proptest::prelude::*;

fn setup() {
    combat_core::config::ensure_constants_initialized();
}

#[derive(Debug, Clone)]
enum Op {
    Hit(i32),
    Heal(f64),
    Gain(f64),
    Wait(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..400i32).prop_map(Op::Hit),
        (0.0..300.0f64).prop_map(Op::Heal),
        (-200.0..200.0f64).prop_map(Op::Gain),
        (0.0..2.0f64).prop_map(Op::Wait),
    ]
}

fn class() -> impl Strategy<Value = UnitClass> {
    prop_oneof![
        Just(UnitClass::Warrior),
        Just(UnitClass::Mage),
        Just(UnitClass::Priest),
        Just(UnitClass::Rogue),
        Just(UnitClass::Hunter),
    ]
}

proptest! {
    #[test]
    fn test_pools_stay_in_bounds(class in class(), ops in prop::collection::vec(op(), 1..40)) {
        setup();
        let mut world = World::new(1);
        let unit = world.add_party_member(Unit::new(class, 0.0, 0.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 500.0, 0.0));

        for op in ops {
            match op {
                Op::Hit(raw) => {
                    let mut ctx = world.context();
                    apply_damage(&mut ctx, dummy, unit, raw);
                }
                Op::Heal(amount) => {
                    let mut ctx = world.context();
                    heal(&mut ctx, unit, unit, amount);
                }
                Op::Gain(amount) => world.unit_mut(unit).unwrap().add_resource(amount),
                Op::Wait(dt) => world.tick(dt).unwrap(),
            }
            let u = world.unit(unit).unwrap();
            prop_assert!(u.hp >= 0.0 && u.hp <= u.max_hp);
            prop_assert!(u.resource >= 0.0 && u.resource <= u.max_resource);
            prop_assert!(u.absorb_shield >= 0.0);
            prop_assert_eq!(u.is_dead, u.hp <= 0.0);
        }
    }

    #[test]
    fn test_death_is_permanent(hits in prop::collection::vec(0..2000i32, 1..20)) {
        setup();
        let mut world = World::new(2);
        let rogue = world.add_party_member(Unit::new(UnitClass::Rogue, 0.0, 0.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 500.0, 0.0));

        let mut died = false;
        for raw in hits {
            {
                let mut ctx = world.context();
                apply_damage(&mut ctx, dummy, rogue, raw);
                heal(&mut ctx, dummy, rogue, 500.0);
            }
            let u = world.unit(rogue).unwrap();
            if died {
                prop_assert!(u.is_dead);
                prop_assert_eq!(u.hp, 0.0);
            }
            died = u.is_dead;
        }
    }

    #[test]
    fn test_mitigation_conserves_damage(shield in 0.0..500.0f64, raw in 0..500i32) {
        setup();
        let mut priest = Unit::new(UnitClass::Priest, 0.0, 0.0);
        priest.absorb_shield = shield.floor();
        let result = mitigate(&mut priest, raw, &CombatConstants::default());

        prop_assert!(!result.blocked);
        prop_assert_eq!(result.absorbed + result.remaining, raw);
        prop_assert!(priest.absorb_shield >= 0.0);
    }

    #[test]
    fn test_recalc_is_idempotent(
        class in class(),
        picks in prop::collection::vec(prop::sample::select(vec![1u32, 2, 3, 4, 5, 101, 102, 103, 104, 105, 106, 201, 202, 203, 204, 1001, 1002]), 0..8),
        hp_pct in 0.01..1.0f64,
    ) {
        setup();
        let registry = ItemRegistry::builtin();
        let mut unit = Unit::new(class, 0.0, 0.0);
        for (uid, id) in picks.into_iter().enumerate() {
            let item = Item::with_uid(registry.get(id).unwrap(), uid as u64);
            let index = unit.give_item(item).unwrap();
            unit.equip_from_bag(index).unwrap();
        }
        unit.hp = unit.max_hp * hp_pct;

        unit.recalc_stats();
        let once = (unit.max_hp, unit.max_resource, unit.min_dmg, unit.max_dmg);
        let (hp, resource) = (unit.hp, unit.resource);
        unit.recalc_stats();
        let twice = (unit.max_hp, unit.max_resource, unit.min_dmg, unit.max_dmg);

        prop_assert_eq!(once, twice);
        prop_assert!((unit.hp - hp).abs() < 1e-9);
        prop_assert!((unit.resource - resource).abs() < 1e-9);
        prop_assert!(unit.min_dmg <= unit.max_dmg);
    }
}
