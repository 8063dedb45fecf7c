//! Equipping or removing a rune fully restores the creature by default.

use arena_core::{
    BaseStats, BattleConfig, Creature, Element, HarmfulEffect, HarmfulKind, Rune, RuneSet,
    RuneStat,
};

fn creature() -> Creature {
    Creature::new(
        "swapper",
        Element::Fire,
        2,
        BaseStats::new(1000.0, 100.0, 100.0, 50.0, 100.0),
    )
}

fn hp_rune() -> Rune {
    Rune::new("vital", 2, 1, RuneSet::Energy, RuneStat::HpPct).unwrap()
}

#[test]
fn rune_change_heals_to_full_by_default() {
    let config = BattleConfig::default();
    assert!(config.restore_on_rune_change);

    let mut c = creature();
    c.take_damage(600.0);
    c.add_harmful_effect(HarmfulEffect::new(HarmfulKind::Stun, 2))
        .unwrap();

    c.place_rune(hp_rune(), &config).unwrap();
    assert_eq!(c.current_hp(), c.max_hp());
    assert!(c.harmful_effects().is_empty());

    c.take_damage(600.0);
    c.remove_rune(1, &config).unwrap();
    assert_eq!(c.current_hp(), 1000.0);
}

#[test]
fn restore_can_be_switched_off() {
    let config = BattleConfig::default().with_restore_on_rune_change(false);

    let mut c = creature();
    c.take_damage(600.0);
    c.place_rune(hp_rune(), &config).unwrap();
    assert_eq!(c.current_hp(), 400.0);
    assert!(c.max_hp() > 1000.0);

    // Losing max HP clamps the current value
    c.heal(10_000.0);
    let full = c.current_hp();
    c.remove_rune(1, &config).unwrap();
    assert!(c.current_hp() < full);
    assert_eq!(c.current_hp(), c.max_hp());
}
