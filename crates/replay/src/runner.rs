//! Drive a [`GameState`] through a script and collect what happened.

use crate::core::GameState;
use crate::protocol::{EventOut, EventRecord, Outcome, ReplayReport, SnapshotOut};
use crate::script::ReplayScript;
use crate::ReplayError;

/// Run `script` to completion.
///
/// Every step applies its actions, then ticks by its `dt`. Events are stamped
/// with the step index and the simulated time at the end of that step. Every
/// step is consumed: a finished session stays frozen until a `restart` action
/// starts the next one.
pub fn run(script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let plan = script.plan()?;
    let config = script.config();
    let mut state = GameState::new(config);

    let mut events = Vec::new();
    let mut elapsed_ms: u64 = 0;
    let mut steps_run = 0;

    for (index, step) in plan.iter().enumerate() {
        for &action in &step.actions {
            state.apply_action(action);
        }
        // Ticks on a finished session are no-ops
        let _ = state.tick(step.dt);
        elapsed_ms += u64::from(step.dt);
        steps_run = index + 1;

        events.extend(state.drain_events().iter().map(|event| EventRecord {
            step: index,
            time_ms: elapsed_ms,
            event: EventOut::from(event),
        }));
    }

    let outcome = if state.game_over() {
        Outcome::GameOver
    } else if state.won() {
        Outcome::Won
    } else {
        Outcome::Running
    };

    Ok(ReplayReport {
        seed: config.seed,
        boss_mode: config.boss_mode,
        randomizer: config.randomizer.as_str(),
        steps_run,
        elapsed_ms,
        outcome,
        final_state: SnapshotOut::from(&state.snapshot()),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(json: &str) -> ReplayScript {
        ReplayScript::from_json(json).unwrap()
    }

    #[test]
    fn empty_script_reports_fresh_session() {
        let report = run(&script(r#"{ "seed": 5 }"#)).unwrap();
        assert_eq!(report.steps_run, 0);
        assert_eq!(report.elapsed_ms, 0);
        assert_eq!(report.outcome, Outcome::Running);
        assert_eq!(report.final_state.score, 0);
        assert!(report.events.is_empty());
    }

    #[test]
    fn hard_drop_settles_and_scores() {
        let report = run(&script(
            r#"{ "seed": 9, "steps": [ { "dt": 16, "actions": ["hardDrop"] } ] }"#,
        ))
        .unwrap();
        assert_eq!(report.steps_run, 1);
        assert_eq!(report.elapsed_ms, 16);
        assert!(report.final_state.score > 0);
        assert!(report.final_state.score % 2 == 0);
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e.event, EventOut::PieceSettled { .. })));
    }

    #[test]
    fn same_script_same_report() {
        let text = r#"{ "seed": 77, "boss_mode": true,
            "steps": [ { "dt": 400, "actions": ["moveLeft"] },
                       { "dt": 400, "actions": ["rotate", "hardDrop"] },
                       { "dt": 5000 }, { "dt": 5000, "actions": ["hardDrop"] } ] }"#;
        let a = serde_json::to_string(&run(&script(text)).unwrap()).unwrap();
        let b = serde_json::to_string(&run(&script(text)).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn restart_after_game_over_starts_a_new_session() {
        let mut steps = vec![r#"{ "dt": 16, "actions": ["hardDrop"] }"#; 200];
        steps.push(r#"{ "dt": 16, "actions": ["restart"] }"#);
        steps.push(r#"{ "dt": 16, "actions": ["hardDrop"] }"#);
        let text = format!(r#"{{ "seed": 2, "steps": [{}] }}"#, steps.join(","));
        let report = run(&script(&text)).unwrap();

        assert_eq!(report.steps_run, 202);
        assert_eq!(report.outcome, Outcome::Running);
        assert!(!report.final_state.game_over);
        let lost_at = report
            .events
            .iter()
            .position(|e| matches!(e.event, EventOut::GameOver))
            .expect("session was lost before the restart");
        // Only the final drop lands on the fresh board
        assert!(report.events[lost_at + 1..]
            .iter()
            .all(|e| e.step == 201 && matches!(e.event, EventOut::PieceSettled { .. })));
        assert_eq!(report.final_state.score % 2, 0);
        assert!(report.final_state.score > 0);
    }

    #[test]
    fn unknown_action_fails_before_running() {
        let err = run(&script(r#"{ "steps": [ { "actions": ["spin"] } ] }"#)).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownAction { step: 0, .. }));
    }
}
