//! Headless replay runner.
//!
//! Usage: `replay <script.json>`. Prints the JSON report on stdout and a short
//! summary on stderr.

use anyhow::{bail, Context, Result};

use tetris_overlord::core::validate_catalog;
use tetris_overlord::replay::{run, ReplayScript};

fn main() -> Result<()> {
    validate_catalog()?;

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: replay <script.json>");
    };

    let script =
        ReplayScript::load(&path).with_context(|| format!("failed to load replay {path}"))?;
    eprintln!(
        "[replay] seed={} boss_mode={} steps={}",
        script.seed,
        script.boss_mode,
        script.steps.len()
    );

    let report = run(&script)?;
    eprintln!(
        "[replay] outcome={:?} steps_run={} elapsed_ms={} score={} events={}",
        report.outcome,
        report.steps_run,
        report.elapsed_ms,
        report.final_state.score,
        report.events.len()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
