use std::io::Write;

use nexascore_core::{Analysis, Outcome, ScoreResult};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Write the result object as one line of JSON (or indented with `pretty`).
pub fn write_json(w: &mut dyn Write, result: &ScoreResult, pretty: bool) -> std::io::Result<()> {
    let json = if pretty {
        result.to_json_pretty()
    } else {
        result.to_json()
    }
    .map_err(std::io::Error::other)?;
    writeln!(w, "{}", json)?;
    w.flush()
}

/// Print a human-readable breakdown of a run.
pub fn print_summary(
    w: &mut dyn Write,
    source_name: &str,
    analysis: &Analysis,
    color: ColorMode,
) -> std::io::Result<()> {
    let result = &analysis.result;
    writeln!(w, "Scoring {}...", source_name)?;

    if analysis.outcome != Outcome::Success {
        if color.enabled() {
            writeln!(w, "{} {}", "FAILED:".red().bold(), result.message)?;
        } else {
            writeln!(w, "FAILED: {}", result.message)?;
        }
        return Ok(());
    }

    match analysis.similarity {
        Some(similarity) => writeln!(w, "  Similarity:   {:.1}%", similarity)?,
        None => {
            if color.enabled() {
                writeln!(w, "  Similarity:   {}", "n/a (no shared vocabulary)".dimmed())?;
            } else {
                writeln!(w, "  Similarity:   n/a (no shared vocabulary)")?;
            }
        }
    }
    writeln!(
        w,
        "  Term bonus:   +{:.0} ({} shared terms)",
        analysis.bonus,
        result.matches.len()
    )?;

    if !result.matches.is_empty() {
        let terms = result.matches.join(", ");
        if color.enabled() {
            writeln!(w, "  Shared terms: {}", terms.cyan())?;
        } else {
            writeln!(w, "  Shared terms: {}", terms)?;
        }
    }

    let label = format!("{}/100", result.score);
    if color.enabled() {
        let colored = match result.score {
            70..=100 => label.green().bold().to_string(),
            40..=69 => label.yellow().bold().to_string(),
            _ => label.red().bold().to_string(),
        };
        writeln!(w, "  Score:        {}", colored)?;
    } else {
        writeln!(w, "  Score:        {}", label)?;
    }
    Ok(())
}
