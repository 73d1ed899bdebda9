use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use urania::serialize_patterns;

/// Aspect tables and aspect patterns for a chart subject
#[derive(Parser, Debug)]
#[command(name = "urania", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect multi-point aspect patterns
    Patterns(SubjectArgs),
    /// List every pairwise aspect, tightest orb first
    Aspects(SubjectArgs),
}

#[derive(Args, Debug)]
struct SubjectArgs {
    #[arg(help = "Path to the subject JSON (object of point records with abs_pos)")]
    subject: PathBuf,

    /// Restrict to these point keys (repeatable)
    #[arg(long = "active", value_name = "KEY")]
    active: Vec<String>,

    /// TOML config; defaults to configs/urania.toml when present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_subject(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read subject {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn run(command: Command) -> anyhow::Result<()> {
    let (args, want_patterns) = match command {
        Command::Patterns(args) => (args, true),
        Command::Aspects(args) => (args, false),
    };
    let config = urania_config::load_config_or_default(args.config.as_deref())?;
    let calculator = urania_config::build_calculator(&config)?;
    let subject = read_subject(&args.subject)?;
    let active = (!args.active.is_empty()).then_some(args.active.as_slice());

    if want_patterns {
        let matches = calculator
            .compute_patterns(&subject, active)
            .context("Pattern detection failed")?;
        log::info!("Found {} pattern(s)", matches.len());
        print_json(&serialize_patterns(&matches), args.pretty)
    } else {
        let rows = calculator
            .compute(&subject, active)
            .context("Aspect calculation failed")?;
        log::info!("Found {} aspect(s)", rows.len());
        print_json(&rows, args.pretty)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli.command)
}
