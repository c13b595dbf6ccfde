//! Output renderers and formatting helpers for run outcomes.

use std::io::Write;

use anyhow::anyhow;
use dsweep_fsops::Relocation;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::pipeline::SweepOutcome;

pub(crate) fn render_outcome(
    outcome: &SweepOutcome,
    format: OutputFormat,
    out: &mut impl Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(outcome)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            writeln!(out, "{text}").map_err(write_failure)?;
        }
        OutputFormat::Table => render_table(outcome, out).map_err(write_failure)?,
    }
    Ok(())
}

fn render_table(outcome: &SweepOutcome, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "run: {}", outcome.run_id)?;
    writeln!(
        out,
        "tasks: {} accepted, {} dropped, {} replaced",
        outcome.tasks.accepted, outcome.tasks.dropped, outcome.tasks.replaced
    )?;
    writeln!(
        out,
        "entries: {} kept, {} orphaned",
        outcome.retained,
        outcome.planned.len()
    )?;
    if outcome.planned.is_empty() {
        writeln!(out, "nothing to relocate")?;
        return Ok(());
    }

    let action = action_label(outcome.dry_run);
    writeln!(out, "{:<10} {:<4} NAME", "ACTION", "KIND")?;
    for step in &outcome.planned {
        writeln!(
            out,
            "{:<10} {:<4} {}",
            action,
            kind_label(step),
            step.name.to_string_lossy()
        )?;
    }
    Ok(())
}

const fn action_label(dry_run: bool) -> &'static str {
    if dry_run { "would move" } else { "moved" }
}

const fn kind_label(step: &Relocation) -> &'static str {
    if step.is_dir { "dir" } else { "file" }
}

fn write_failure(err: std::io::Error) -> CliError {
    CliError::failure(anyhow!("failed to write output: {err}"))
}
