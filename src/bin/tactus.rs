use std::{
    fs::File,
    io::{BufReader, Read as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tactus", version)]
struct Cli {
    /// Log engine diagnostics to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a timeline script at one or more times and print one JSON line per sample.
    Sample(SampleArgs),
    /// Print where each segment lands and which advisories it raises.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input timeline script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Query time, in milliseconds or `[[H:]MM:]SS`. Repeatable.
    #[arg(long = "at", required = true, value_parser = parse_time)]
    at: Vec<f64>,

    /// Clock origin of the timeline, in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    origin: f64,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input timeline script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_time(s: &str) -> Result<f64, String> {
    if let Ok(ms) = s.parse::<f64>() {
        return Ok(ms);
    }
    tactus::TimeExpr::parse(s).map_err(|e| e.to_string())
}

fn read_script(path: &Path) -> anyhow::Result<tactus::TimelineScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let mut text = String::new();
    BufReader::new(f)
        .read_to_string(&mut text)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let script = tactus::TimelineScript::from_json(&text)
        .with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(script)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let samples = tactus::sample_script(&script, args.origin, &args.at)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for sample in &samples {
        serde_json::to_writer(&mut out, sample).context("write sample")?;
        writeln!(out).context("write sample")?;
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let report = tactus::check_script(&script)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("write report")?;
    writeln!(out).context("write report")?;

    if !report.warnings.is_empty() {
        eprintln!("{} advisory warning(s)", report.warnings.len());
    }
    Ok(())
}
