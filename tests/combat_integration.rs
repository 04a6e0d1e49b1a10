//! Combat integration tests
//!
//! Synchronous fights go through the arena, duels through the public
//! combat API with seeded NPCs.

use std::sync::Arc;

use npc_arena::combat::{can_kill, fight, pairs_within, resolve_duel, DuelOutcome};
use npc_arena::core::config::SimulationConfig;
use npc_arena::core::types::Position;
use npc_arena::entity::{Npc, Species};
use npc_arena::observer::{Console, KillObserver, RecordingObserver};
use npc_arena::simulation::Arena;

fn arena() -> (Arena, Arc<RecordingObserver>) {
    let recorder = Arc::new(RecordingObserver::default());
    let arena = Arena::with_parts(
        SimulationConfig::default(),
        Arc::new(Console::captured()),
        vec![recorder.clone() as Arc<dyn KillObserver>],
    );
    (arena, recorder)
}

#[test]
fn test_dragon_kills_only_the_near_bull() {
    let (arena, recorder) = arena();
    arena.add_npc(Species::Dragon, "Dragon", 0, 0).unwrap();
    arena.add_npc(Species::Bull, "Bull", 5, 5).unwrap();
    arena.add_npc(Species::Bull, "BullFar", 100, 100).unwrap();

    let report = arena.fight(10.0);
    assert_eq!(report.engagements, 1);
    assert_eq!(report.survivors, 2);

    let names: Vec<String> = arena.snapshot().iter().map(|n| n.name().to_string()).collect();
    assert_eq!(names, vec!["Dragon", "BullFar"]);
    assert_eq!(recorder.kills(), vec![("Dragon".to_string(), "Bull".to_string())]);
}

#[test]
fn test_fight_range_is_inclusive() {
    let (arena, _) = arena();
    arena.add_npc(Species::Bull, "Bull", 0, 0).unwrap();
    arena.add_npc(Species::Frog, "Frog", 3, 4).unwrap();
    assert_eq!(arena.fight(4.0).kills.len(), 0);
    assert_eq!(arena.fight(5.0).kills.len(), 1);
    assert_eq!(arena.npc_count(), 1);
}

#[test]
fn test_food_chain_in_one_sweep() {
    // The bull dies to the dragon but still eats the frog in the same sweep.
    let (arena, recorder) = arena();
    arena.add_npc(Species::Dragon, "Dragon", 10, 10).unwrap();
    arena.add_npc(Species::Bull, "Bull", 11, 10).unwrap();
    arena.add_npc(Species::Frog, "Frog", 12, 10).unwrap();

    let report = arena.fight(5.0);
    assert_eq!(report.kills.len(), 2);
    assert_eq!(recorder.count(), 2);
    let survivors: Vec<Species> = arena.snapshot().iter().map(|n| n.species()).collect();
    assert_eq!(survivors, vec![Species::Dragon]);
}

#[test]
fn test_two_dragons_one_bull_single_notification() {
    let (arena, recorder) = arena();
    arena.add_npc(Species::Dragon, "Dragon", 0, 0).unwrap();
    arena.add_npc(Species::Dragon, "Dragon", 1, 0).unwrap();
    arena.add_npc(Species::Bull, "Bull", 0, 1).unwrap();

    let report = arena.fight(3.0);
    assert_eq!(report.engagements, 2);
    assert_eq!(report.kills, vec![("Dragon".to_string(), "Bull".to_string())]);
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_fight_on_plain_collection() {
    let mut npcs = vec![
        Npc::spawn(Species::Frog, "F1", Position::new(0, 0), 0),
        Npc::spawn(Species::Frog, "F2", Position::new(0, 0), 0),
    ];
    let report = fight(&mut npcs, 100.0);
    assert_eq!(report.engagements, 0);
    assert_eq!(npcs.len(), 2);
}

#[test]
fn test_duel_never_lets_prey_win() {
    for seed in 0..50 {
        let frog = Npc::spawn(Species::Frog, "Frog", Position::new(0, 0), seed);
        let bull = Npc::spawn(Species::Bull, "Bull", Position::new(0, 0), seed + 1000);
        assert_eq!(resolve_duel(&frog, &bull), DuelOutcome::Ineligible);
        assert!(bull.is_alive());
    }
}

#[test]
fn test_duel_outcomes_follow_dice() {
    let mut kills = 0;
    for seed in 0..200 {
        let dragon = Npc::spawn(Species::Dragon, "Dragon", Position::new(0, 0), seed);
        let bull = Npc::spawn(Species::Bull, "Bull", Position::new(0, 0), seed + 7);
        match resolve_duel(&dragon, &bull) {
            DuelOutcome::Kill { attack, defense } => {
                assert!(attack > defense);
                assert!(!bull.is_alive());
                kills += 1;
            }
            DuelOutcome::Miss { attack, defense } => {
                assert!(attack <= defense);
                assert!(bull.is_alive());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    // P(attack > defense) on two d6 is 15/36.
    assert!(kills > 40 && kills < 130, "kills = {kills}");
}

#[test]
fn test_realtime_scan_uses_species_reach() {
    let dragon = Npc::spawn(Species::Dragon, "Dragon", Position::new(0, 0), 0);
    let bull = Npc::spawn(Species::Bull, "Bull", Position::new(20, 0), 0);
    let pairs = pairs_within(&[dragon, bull], |npc| f64::from(npc.params().kill_distance));
    // Dragon reaches 30, bull only 10.
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.name(), "Dragon");
    assert!(can_kill(pairs[0].0.species(), pairs[0].1.species()));
}
