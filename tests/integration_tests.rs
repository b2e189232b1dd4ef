//! End-to-end sessions through the public engine surface.

use rand::rngs::StdRng;
use rand::SeedableRng;

use tetris_overlord::core::{ActivePiece, BossState, GameConfig, GameEvent, GameState, TickOutcome};
use tetris_overlord::types::{GameAction, PieceKind, Tint, BOARD_WIDTH};

fn vertical_i(column: i8) -> ActivePiece {
    // Rotation 0 of I occupies mask column 2, rows 1..=4
    ActivePiece {
        kind: PieceKind::I,
        rotation: 0,
        x: column - 2,
        y: 0,
        corrupted: false,
    }
}

fn fill_rows(state: &mut GameState, rows: std::ops::RangeInclusive<i8>, gap: i8) {
    for y in rows {
        for x in 0..BOARD_WIDTH as i8 {
            if x != gap {
                state
                    .board_mut()
                    .set(x, y, Some(Tint::Piece(PieceKind::O)));
            }
        }
    }
}

#[test]
fn garbage_then_piece_reports_only_completed_row() {
    let mut state = GameState::new(GameConfig::classic(11));
    let mut rng = StdRng::seed_from_u64(99);

    let mut gaps = Vec::new();
    for _ in 0..4 {
        gaps.push(state.board_mut().inject_garbage_row(&mut rng, 1.0) as i8);
    }
    // Newest garbage row is the bottom one
    let well = gaps[3];
    let other = (well + 1) % BOARD_WIDTH as i8;
    for y in 16..=18 {
        state.board_mut().set(well, y, None);
        state.board_mut().set(other, y, None);
    }
    assert!(state.board().is_corrupted(other, 19));

    state.set_active(vertical_i(well));
    state.drain_events();
    assert_eq!(state.hard_drop(), 15);

    let events = state.drain_events();
    let pending: Vec<usize> = events
        .iter()
        .find_map(|e| match e {
            GameEvent::LinesPending { rows } => Some(rows.to_vec()),
            _ => None,
        })
        .expect("a line should be pending");
    assert_eq!(pending, vec![19]);
    assert_eq!(state.pending_rows(), &[19]);

    state.tick(301);
    let cleared = state
        .drain_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::RowsCleared { rows, points } => Some((rows, points)),
            _ => None,
        })
        .expect("rows cleared after grace window");
    assert_eq!(cleared.0.len(), 1);
    assert_eq!(cleared.0[0].row, 19);
    assert_eq!(cleared.1, 100);
    assert_eq!(state.lines(), 1);
    assert!(state.pending_rows().is_empty());
}

#[test]
fn tetris_on_weakened_boss_wins_and_stuns() {
    let mut state = GameState::new(GameConfig::boss(5));
    {
        let boss = state.boss_mut().expect("boss mode has a boss");
        for _ in 0..5 {
            boss.take_damage(15);
        }
        assert_eq!(boss.health(), 25);
        assert_eq!(boss.phase(), 3);
        assert!(!boss.stunned());
    }

    fill_rows(&mut state, 16..=19, 5);
    state.set_active(vertical_i(5));
    assert_eq!(state.hard_drop(), 15);
    assert_eq!(state.pending_rows(), &[16, 17, 18, 19]);
    state.drain_events();

    // Rows stay on the board during the grace window
    assert_eq!(state.tick(300), TickOutcome::Continue);
    assert!(!state.won());
    assert!(state.board().is_row_full(19));

    assert_eq!(state.tick(1), TickOutcome::Continue);
    assert!(state.won());
    assert!(state.is_terminal());
    assert_eq!(state.score(), 30 + 800);

    let boss = state.boss().expect("boss");
    assert_eq!(boss.health(), 0);
    assert_eq!(boss.phase(), 3);
    assert!(boss.stunned());

    let names: Vec<&str> = state.drain_events().iter().map(GameEvent::name).collect();
    assert_eq!(
        names,
        vec!["rowsCleared", "bossDamaged", "bossStunned", "bossDefeated"]
    );

    // Won sessions are frozen
    let before = state.snapshot();
    assert_eq!(state.tick(5000), TickOutcome::Continue);
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.snapshot(), before);
}

#[test]
fn blocked_spawn_ends_the_session() {
    let mut state = GameState::new(GameConfig::classic(3));
    fill_rows(&mut state, 1..=19, 0);

    // Horizontal I resting on row 1
    state.set_active(ActivePiece {
        kind: PieceKind::I,
        rotation: 1,
        x: 3,
        y: -2,
        corrupted: false,
    });
    assert_eq!(state.hard_drop(), 0);
    assert!(!state.game_over());

    assert_eq!(state.tick(500), TickOutcome::GameOver);
    assert!(state.game_over());
    assert!(state
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver)));

    let spawn = state.active();
    assert!(!state.board().is_valid_placement(&spawn, 0, 0, None));
    assert_eq!(state.tick(16), TickOutcome::GameOver);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert!(state.board().cells().iter().all(Option::is_none));
}

#[test]
fn phase_one_attacks_alternate() {
    let mut boss = BossState::new();
    let mut rng = StdRng::seed_from_u64(1234);
    let mut previous = boss.select_attack(&mut rng);
    for _ in 0..100 {
        let next = boss.select_attack(&mut rng);
        assert_ne!(next, previous);
        previous = next;
    }
}

#[test]
fn boss_session_fires_attacks_on_schedule() {
    let mut state = GameState::new(GameConfig::boss(21));
    state.tick(4999);
    assert!(!state
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::AttackFired { .. })));
    assert!(state.boss().expect("boss").attack_imminent());

    state.tick(1);
    let fired: Vec<GameEvent> = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::AttackFired { .. }))
        .collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(state.boss().expect("boss").attack_timer_ms(), 0);
}

fn play(seed: u64) -> GameState {
    let mut state = GameState::new(GameConfig::boss(seed));
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];
    for (i, &action) in script.iter().cycle().take(60).enumerate() {
        state.apply_action(action);
        state.tick(if i % 3 == 0 { 700 } else { 16 });
    }
    state
}

#[test]
fn same_seed_same_session() {
    let a = play(4242);
    let b = play(4242);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.events(), b.events());
}

#[test]
fn classic_mode_has_no_boss() {
    let mut state = GameState::new(GameConfig::classic(8));
    assert!(state.boss().is_none());
    state.tick(20_000);
    assert_eq!(state.speed_boost_ms(), 0);
    assert!(!state.corruption_active());
}
