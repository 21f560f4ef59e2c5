//! Property tests: invariants that must hold for any command stream

use std::collections::HashMap;

use proptest::prelude::*;
use send_em_to_zero::Engine;
use send_em_to_zero::consts::MAX_LIVES;
use send_em_to_zero::sim::Difficulty;

#[derive(Debug, Clone)]
enum Op {
    Advance(u32),
    MoveLeft,
    MoveRight,
    Destroy,
    TogglePause,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u32..400).prop_map(Op::Advance),
        2 => Just(Op::MoveLeft),
        2 => Just(Op::MoveRight),
        3 => Just(Op::Destroy),
        1 => Just(Op::TogglePause),
    ]
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

proptest! {
    #[test]
    fn test_engine_invariants(
        seed in any::<u64>(),
        difficulty in difficulty(),
        ops in prop::collection::vec(op(), 1..250),
    ) {
        let mut engine = Engine::new(seed);
        engine.select_difficulty(difficulty).unwrap();
        engine.start().unwrap();
        let columns = difficulty.columns();
        let mut positions: HashMap<u64, f32> = HashMap::new();
        let mut max_id_seen = 0u64;

        for op in ops {
            match op {
                Op::Advance(ms) => engine.advance(ms),
                Op::MoveLeft => { let _ = engine.move_left(); }
                Op::MoveRight => { let _ = engine.move_right(); }
                Op::TogglePause => { let _ = engine.toggle_pause(); }
                Op::Destroy => {
                    let col = engine.player_column();
                    let expected = engine
                        .objects()
                        .iter()
                        .rev()
                        .find(|o| o.column == col)
                        .map(|o| o.id);
                    if let Ok(outcome) = engine.destroy() {
                        prop_assert_eq!(outcome.map(|o| o.destroyed.id), expected);
                    }
                }
            }

            let objects = engine.objects();
            // Spawn order is ID order, and IDs never repeat
            for pair in objects.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
            for obj in objects {
                prop_assert!(obj.column < columns);
                if let Some(&before) = positions.get(&obj.id) {
                    prop_assert!(obj.position >= before);
                } else {
                    prop_assert!(obj.id > max_id_seen);
                }
            }
            max_id_seen = objects.iter().map(|o| o.id).max().unwrap_or(0).max(max_id_seen);
            positions = objects.iter().map(|o| (o.id, o.position)).collect();

            prop_assert!(engine.player_column() < columns);
            // Only wave bonuses may push lives over the cap
            prop_assert!(engine.lives() <= MAX_LIVES + engine.wave() - 1);
            prop_assert_eq!(engine.is_over(), engine.lives() == 0);
        }
    }
}
