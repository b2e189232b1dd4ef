//! Replay runs through the facade crate.

use tetris_overlord::replay::{run, EventOut, Outcome, ReplayError, ReplayScript};

const DEMO: &str = include_str!("../demos/boss_opening.json");

#[test]
fn demo_script_runs_deterministically() {
    let script = ReplayScript::from_json(DEMO).unwrap();
    assert!(script.boss_mode);

    let first = run(&script).unwrap();
    let second = run(&script).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.randomizer, "bag7");
    assert!(first.final_state.boss.is_some());
    assert!(first.final_state.score > 0);
}

#[test]
fn boss_attacks_show_up_in_the_event_log() {
    let script = ReplayScript::from_json(
        r#"{ "seed": 1, "boss_mode": true,
             "steps": [ { "dt": 5000 }, { "dt": 16 } ] }"#,
    )
    .unwrap();
    let report = run(&script).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let events = json["events"].as_array().unwrap();
    let attack = events
        .iter()
        .find(|e| e["type"] == "attackFired")
        .expect("first attack fires at 5000ms");
    assert_eq!(attack["step"], 0);
    assert_eq!(attack["time_ms"], 5000);
    let name = attack["attack"].as_str().unwrap();
    assert!(name == "garbageLines" || name == "speedBoost");
    assert_eq!(json["final"]["boss"]["last_attack"], name);
}

#[test]
fn lost_session_stays_over_without_restart() {
    // Dropping every piece in place stacks the spawn column until it is blocked
    let steps: Vec<String> = (0..600)
        .map(|_| r#"{ "dt": 16, "actions": ["hardDrop"] }"#.to_string())
        .collect();
    let text = format!(r#"{{ "seed": 2, "steps": [{}] }}"#, steps.join(","));
    let report = run(&ReplayScript::from_json(&text).unwrap()).unwrap();

    assert_eq!(report.outcome, Outcome::GameOver);
    assert_eq!(report.steps_run, 600);
    assert_eq!(report.elapsed_ms, 600 * 16);
    assert!(report.final_state.game_over);
    let lost: Vec<_> = report
        .events
        .iter()
        .filter(|e| matches!(e.event, EventOut::GameOver))
        .collect();
    assert_eq!(lost.len(), 1);
    assert!(lost[0].step < 600);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"], "gameOver");
}

#[test]
fn restart_step_revives_a_lost_replay() {
    let mut steps = vec![r#"{ "dt": 16, "actions": ["hardDrop"] }"#; 200];
    steps.push(r#"{ "dt": 16, "actions": ["restart"] }"#);
    let text = format!(r#"{{ "seed": 2, "steps": [{}] }}"#, steps.join(","));
    let report = run(&ReplayScript::from_json(&text).unwrap()).unwrap();

    assert_eq!(report.outcome, Outcome::Running);
    assert_eq!(report.final_state.score, 0);
    assert_eq!(report.final_state.lines, 0);
    assert!(report.final_state.board.iter().all(|row| row == ".........."));
}

#[test]
fn bad_scripts_are_rejected() {
    assert!(matches!(
        ReplayScript::from_json("{ not json"),
        Err(ReplayError::Json(_))
    ));
    let script = ReplayScript::from_json(r#"{ "steps": [ { "actions": ["moveUp"] } ] }"#).unwrap();
    let err = run(&script).unwrap_err();
    assert_eq!(err.to_string(), r#"step 0: unknown action "moveUp""#);
}
