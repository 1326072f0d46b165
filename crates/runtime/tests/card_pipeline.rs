use std::io::Write;

use defense_content::{CardRegistry, ConfigLoader};
use defense_core::{
    Archetype, Card, CardKind, DamageSource, EffectTag, Hit, Position, StatusKind, WeaponId,
    WeaponLoadout,
};
use defense_runtime::{RuntimeError, Simulation};

fn source() -> DamageSource {
    DamageSource::Weapon(WeaponId(1))
}

#[test]
fn slow_card_amplifies_follow_up_hits() {
    let registry = CardRegistry::load().expect("embedded tables parse");
    let loadout = WeaponLoadout::from_cards([Card::new(CardKind::Slow, 3)], &registry);
    let merged = loadout.merged();
    assert!(merged.effect(EffectTag::Slow).is_some());

    let mut sim = Simulation::new(Default::default()).expect("default config is valid");
    let brute = sim.spawn(Archetype::Brute, 500.0, Position::ORIGIN);

    let first = sim
        .apply_hit(brute, Hit::new(20.0, source()), merged)
        .expect("brute exists");
    let second = sim
        .apply_hit(brute, Hit::new(20.0, source()), merged)
        .expect("brute exists");

    assert_eq!(first.dealt, 20.0);
    assert!((second.dealt - 23.0).abs() < 1e-4);
    let unit = sim.unit(brute).expect("brute alive");
    assert!(unit.status(StatusKind::Slow).is_some());
    assert!(unit.speed_multiplier() < 1.0);
}

#[test]
fn stacked_damage_cards_raise_hit_damage() {
    let registry = CardRegistry::load().expect("embedded tables parse");
    let mut loadout = WeaponLoadout::from_cards([Card::new(CardKind::Damage, 3)], &registry);
    assert!((loadout.merged().modifiers.damage() - 11.0).abs() < 1e-4);

    // 11 + 11 × 70%
    loadout.equip(Card::new(CardKind::Damage, 3), &registry);
    assert!((loadout.merged().modifiers.damage() - 18.7).abs() < 1e-4);
}

#[test]
fn minigun_loadout_stays_above_floor() {
    let registry = CardRegistry::load().expect("embedded tables parse");
    let loadout = WeaponLoadout::from_cards(vec![Card::new(CardKind::Minigun, 3); 8], &registry);
    let merged = loadout.merged();
    assert_eq!(merged.modifiers.damage_multiplier, Some(0.10));
    assert!((merged.modifiers.damage_for(10.0) - 1.0).abs() < 1e-4);
}

#[test]
fn evolved_card_uses_its_own_table() {
    let registry = CardRegistry::load().expect("embedded tables parse");
    let classic = WeaponLoadout::from_cards([Card::new(CardKind::Damage, 1)], &registry);
    let sniper = WeaponLoadout::from_cards(
        [Card::new(CardKind::Damage, 1).with_evolution("sniper")],
        &registry,
    );
    assert!(sniper.merged().modifiers.damage() > classic.merged().modifiers.damage());
    assert!(sniper.merged().modifiers.range() > 0.0);
}

#[test]
fn simulation_runs_on_loaded_config() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[hazard]\nradius = 10.0\n\n[soul]\nheal_percent = 0.5").expect("write config");
    let config = ConfigLoader::load(file.path()).expect("config loads");

    let mut sim = Simulation::new(config).expect("loaded config is valid");
    let necromancer = sim.spawn(Archetype::Necromancer, 100.0, Position::new(5.0, 0.0));
    sim.deal_damage(necromancer, 80.0, None).expect("necromancer exists");
    let zombie = sim.spawn(Archetype::Zombie, 1.0, Position::ORIGIN);
    sim.deal_damage(zombie, 1.0, None).expect("zombie exists");

    sim.tick(0.1);
    let healed = sim.unit(necromancer).map(|unit| unit.current_health());
    assert_eq!(healed, Some(70.0));
}

#[test]
fn loaded_config_is_validated() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[soul]\nspeed = -1.0").expect("write config");
    let config = ConfigLoader::load(file.path()).expect("config parses");

    assert!(matches!(
        Simulation::new(config),
        Err(RuntimeError::InvalidConfig { field: "soul.speed", .. })
    ));
}
