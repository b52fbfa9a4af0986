use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use splitledger_api::{AppConfig, Script, SettlementReport, SplitBook};

#[derive(Debug, Parser)]
#[command(
    name = "splitledger",
    version,
    about = "Replay shared-expense command scripts and print who owes whom."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a script and print balances, transactions and the settlement.
    Run(RunArgs),
    /// Replay a script and report which commands were rejected.
    Check(CheckArgs),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Path to the JSON command script.
    script: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Remainders at or below this magnitude count as zero (overrides SPLITLEDGER_TOLERANCE).
    #[arg(long)]
    tolerance: Option<f64>,

    /// Decimals shown for amounts (overrides SPLITLEDGER_DISPLAY_PRECISION).
    #[arg(long)]
    precision: Option<usize>,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Path to the JSON command script.
    script: PathBuf,
}

fn main() -> ExitCode {
    splitledger_observability::init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Run(args) => run(args),
        Command::Check(args) => check(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let script =
        Script::from_json(&input).with_context(|| format!("invalid script {}", path.display()))?;
    if script.is_empty() {
        tracing::warn!(path = %path.display(), "script contains no commands");
    }
    Ok(script)
}

fn run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let config = AppConfig::from_env()
        .with_overrides(args.tolerance, args.precision)
        .context("invalid settlement options")?;
    let script = load_script(&args.script)?;

    let mut book = SplitBook::new(config.settlement);
    script.replay(&mut book);
    let report = SettlementReport::from_book(&book);

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let script = load_script(&args.script)?;
    let mut book = SplitBook::new(AppConfig::from_env().settlement);
    let outcome = script.replay(&mut book);

    println!(
        "{} commands: {} accepted, {} rejected",
        script.len(),
        outcome.accepted,
        outcome.rejected.len()
    );
    for rejection in &outcome.rejected {
        println!(
            "  #{} {} [{}]: {}",
            rejection.position, rejection.op, rejection.kind, rejection.message
        );
    }

    Ok(if outcome.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
