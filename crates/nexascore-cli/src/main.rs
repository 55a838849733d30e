use std::ffi::OsString;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use nexascore_core::config_file;
use nexascore_core::{Analysis, Outcome, ScoreResult, Scorer, ScoringConfig};
use nexascore_ingest::SourceExtractor;

mod output;

use output::ColorMode;

/// NexaScore - Score a résumé against a job description
///
/// Prints exactly one JSON object on stdout:
/// {"success": bool, "score": number, "matches": [string], "message": string}
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the candidate résumé (PDF, or .txt/.md plain text)
    source: Option<PathBuf>,

    /// Job description text to score against (may start with "-")
    #[arg(allow_hyphen_values = true)]
    description: Option<String>,

    /// Job title, prepended to the description
    #[arg(long)]
    title: Option<String>,

    /// Desired skill; repeat the flag for several skills
    #[arg(long = "skill", value_name = "NAME")]
    skills: Vec<String>,

    /// Path to a TOML config file (overrides the platform and ./.nexascore.toml files)
    #[arg(long, env = "NEXASCORE_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary on stderr
    #[arg(long)]
    summary: bool,

    /// Show diagnostic logs on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Never show logs
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn init_tracing(cli: &Cli) {
    // Logs go to stderr only; stdout is reserved for the JSON result.
    //   --quiet   → "off"
    //   --verbose → RUST_LOG if set, otherwise "info"
    //   default   → "off"
    let filter = if cli.verbose && !cli.quiet {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_color(cli))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn use_color(cli: &Cli) -> bool {
    !(cli.no_color || std::env::var_os("NO_COLOR").is_some())
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(analysis) => {
            emit(&analysis.result, false);
            return;
        }
    };

    init_tracing(&cli);

    // Panics are reported through the JSON result; the hook only logs them.
    panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));

    let analysis = guarded(|| run(&cli));

    if cli.summary {
        let source_name = cli
            .source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "<missing source>".to_string());
        let mut stderr = std::io::stderr();
        let _ = output::print_summary(
            &mut stderr,
            &source_name,
            &analysis,
            ColorMode(use_color(&cli)),
        );
        let _ = stderr.flush();
    }

    emit(&analysis.result, cli.pretty);
}

/// Parse the command line, folding parse errors into a failed analysis.
///
/// `--help` and `--version` print and exit as usual.
fn parse_args<I, T>(args: I) -> Result<Cli, Analysis>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.render().to_string();
            let detail = rendered.lines().next().unwrap_or_default().trim();
            Err(failed(
                Outcome::InputError,
                ScoreResult::failure(format!("invalid arguments: {detail}")),
            ))
        }
    }
}

/// Run `f`, turning an `Err` or a panic into an internal-error analysis.
fn guarded<F>(f: F) -> Analysis
where
    F: FnOnce() -> anyhow::Result<Analysis>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(e)) => failed(
            Outcome::InternalError,
            ScoreResult::internal_error(format!("{e:#}")),
        ),
        Err(payload) => {
            let description = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            failed(Outcome::InternalError, ScoreResult::internal_error(description))
        }
    }
}

fn failed(outcome: Outcome, result: ScoreResult) -> Analysis {
    Analysis {
        outcome,
        result,
        similarity: None,
        bonus: 0.0,
    }
}

fn emit(result: &ScoreResult, pretty: bool) {
    if let Err(e) = output::write_json(&mut std::io::stdout(), result, pretty) {
        tracing::error!(error = %e, "failed to write result");
    }
}

/// Resolve configuration: --config / NEXASCORE_CONFIG > ./.nexascore.toml > platform file > defaults.
fn resolve_config(explicit: Option<&PathBuf>) -> anyhow::Result<ScoringConfig> {
    let file = match explicit {
        Some(path) => config_file::read_config(path)?,
        None => config_file::load_config(),
    };
    Ok(file.scoring_config()?)
}

fn run(cli: &Cli) -> anyhow::Result<Analysis> {
    let (Some(source), Some(description)) = (&cli.source, &cli.description) else {
        tracing::info!("missing positional arguments");
        return Ok(failed(
            Outcome::InputError,
            ScoreResult::failure(Outcome::InputError.message()),
        ));
    };

    let config = resolve_config(cli.config.as_ref())?;
    let scorer = Scorer::new(config);
    let target = scorer.compose_target(cli.title.as_deref(), description, &cli.skills);

    tracing::info!(source = %source.display(), skills = cli.skills.len(), "scoring document");
    Ok(scorer.score_document(&SourceExtractor, source, &target))
}
