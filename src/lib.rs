//! Cardmatch: card identifier normalization and roster matching.
//!
//! A card reader can hand over the same UID as decimal digits, as hex with
//! or without separators, in either case, or with its bytes reversed, and
//! enrollment tools are just as inconsistent about how they store it.
//! Cardmatch expands a raw scan into every plausible stored form and probes a
//! roster in a fixed priority order until a record matches.
//!
//! # Modules
//!
//! - [`ident`]: Classification and variant expansion of raw scans
//! - [`lookup`]: Probe plans and the sequential lookup chain
//! - [`store`]: Candidate records and the stores they live in
//! - [`scan`]: Debouncing, keyboard-wedge reassembly and scan sessions
//! - [`attendance`]: Attendance rows and sinks
//! - [`error`]: Error types for cardmatch operations

pub mod attendance;
pub mod error;
pub mod ident;
pub mod lookup;
pub mod scan;
pub mod store;

use std::io::BufRead;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info};

pub use error::CardmatchError;

use attendance::{AttendanceAction, AttendanceRow, AttendanceSink, CsvAttendanceLog};
use lookup::ProbePlan;
use scan::{Debouncer, ScanOutcome, ScanSession, WedgeBuffer};
use store::RecordStore;

/// The cardmatch CLI application.
#[derive(Parser)]
#[command(name = "cardmatch")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show how a scanned identifier is classified and expanded.
    Analyze(AnalyzeArgs),
    /// Look up one scanned identifier in the roster.
    Lookup(LookupArgs),
    /// Read scans from stdin and record attendance for each match.
    Scan(ScanArgs),
}

/// Arguments for the analyze subcommand.
#[derive(clap::Args)]
struct AnalyzeArgs {
    /// The raw scanned value.
    identifier: String,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Where records are looked up, and in what order.
#[derive(clap::Args)]
struct StoreArgs {
    /// Roster file (.json or .csv).
    #[arg(long, env = "CARDMATCH_ROSTER")]
    roster: Option<PathBuf>,

    /// Base URL of a PostgREST-style roster API.
    #[cfg(feature = "remote")]
    #[arg(long, env = "CARDMATCH_REMOTE_URL", conflicts_with = "roster")]
    remote_url: Option<String>,

    /// API key sent with remote roster requests.
    #[cfg(feature = "remote")]
    #[arg(long, env = "CARDMATCH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// YAML probe plan overriding the default probe order.
    #[arg(long, env = "CARDMATCH_PLAN")]
    plan: Option<PathBuf>,
}

/// Arguments for the lookup subcommand.
#[derive(clap::Args)]
struct LookupArgs {
    /// The raw scanned value.
    identifier: String,

    #[command(flatten)]
    store: StoreArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the scan subcommand.
#[derive(clap::Args)]
struct ScanArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// CSV file that attendance rows are appended to.
    #[arg(long, env = "CARDMATCH_LOG")]
    log: Option<PathBuf>,

    /// Attendance action recorded for each match.
    #[arg(long, value_enum, default_value_t = AttendanceAction::CheckIn)]
    action: AttendanceAction,

    /// Ignore a repeat of the same card within this many milliseconds.
    #[arg(
        long,
        default_value_t = scan::DEFAULT_DEBOUNCE_MS,
        value_parser = clap::value_parser!(u64).range(..=scan::MAX_DEBOUNCE_MS)
    )]
    debounce_ms: u64,

    /// Treat stdin as keyboard-wedge keystrokes, flushing every N digits.
    #[arg(
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=scan::MAX_WEDGE_DIGITS as u64)
    )]
    wedge_digits: Option<usize>,

    /// Longest pause between wedge keystrokes of one scan, in milliseconds.
    #[arg(
        long,
        default_value_t = scan::DEFAULT_WEDGE_GAP_MS,
        value_parser = clap::value_parser!(u64).range(1..=scan::MAX_WEDGE_GAP_MS)
    )]
    wedge_gap_ms: u64,
}

/// Report rendering selected with `--output`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, CardmatchError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CardmatchError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }
}

/// Run the cardmatch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CardmatchError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::Lookup(args)) => run_lookup(args),
        Some(Commands::Scan(args)) => run_scan(args),
        None => {
            println!("cardmatch {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Card identifier normalization and roster matching.");
            println!();
            println!("Run 'cardmatch --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the analyze subcommand.
fn run_analyze(args: AnalyzeArgs) -> Result<(), CardmatchError> {
    let output = OutputFormat::parse(&args.output)?;
    let expansion = ident::expand_variants(&args.identifier);

    match output {
        OutputFormat::Json => println!("{}", to_json(&expansion)?),
        OutputFormat::Text => print!("{}", expansion),
    }

    match expansion.error {
        Some(source) => Err(CardmatchError::InvalidIdentifier {
            input: expansion.input,
            source,
        }),
        None => Ok(()),
    }
}

/// Execute the lookup subcommand.
fn run_lookup(args: LookupArgs) -> Result<(), CardmatchError> {
    let output = OutputFormat::parse(&args.output)?;
    let store = open_store(&args.store)?;
    let plan = load_plan(&args.store)?;

    let report = lookup::lookup(store.as_ref(), &args.identifier, &plan);

    match output {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => print!("{}", report),
    }

    if report.is_match() {
        return Ok(());
    }
    match report.expansion.error {
        Some(source) => Err(CardmatchError::InvalidIdentifier {
            input: report.expansion.input,
            source,
        }),
        None => Err(CardmatchError::NoMatch {
            input: report.expansion.input,
            probes: report.probes_attempted,
        }),
    }
}

/// Execute the scan subcommand.
fn run_scan(args: ScanArgs) -> Result<(), CardmatchError> {
    let store = open_store(&args.store)?;
    let plan = load_plan(&args.store)?;

    let sink: Box<dyn AttendanceSink> = match &args.log {
        Some(path) => Box::new(CsvAttendanceLog::open(path)?),
        None => Box::new(Vec::<AttendanceRow>::new()),
    };

    let debounce = millis("--debounce-ms", args.debounce_ms)?;
    let wedge_gap = millis("--wedge-gap-ms", args.wedge_gap_ms)?;

    let mut session = ScanSession::new(store.as_ref(), sink)
        .with_plan(plan)
        .with_debouncer(Debouncer::new(debounce))
        .with_action(args.action);
    let mut tally = ScanTally::default();

    let stdin = std::io::stdin();
    let mut wedge = args
        .wedge_digits
        .map(|digits| WedgeBuffer::new(digits, wedge_gap));

    for line in stdin.lock().lines() {
        let line = line?;
        match wedge.as_mut() {
            Some(buffer) => {
                for key in line.chars().chain(std::iter::once('\n')) {
                    if let Some(scan) = buffer.push(key, Utc::now()) {
                        process_scan(&mut session, &scan, &mut tally);
                    }
                }
            }
            None if line.trim().is_empty() => {}
            None => process_scan(&mut session, &line, &mut tally),
        }
    }

    println!("{}", tally);
    Ok(())
}

fn process_scan<S: RecordStore + ?Sized, K: AttendanceSink>(
    session: &mut ScanSession<'_, S, K>,
    raw: &str,
    tally: &mut ScanTally,
) {
    match session.handle_scan(raw, Utc::now()) {
        Ok(outcome) => {
            tally.add(&outcome);
            println!("{}", outcome);
        }
        Err(err) => {
            tally.failed += 1;
            error!(error = %err, "failed to record attendance");
        }
    }
}

/// Running counts printed when a scan session ends.
#[derive(Default)]
struct ScanTally {
    recorded: usize,
    unmatched: usize,
    duplicate: usize,
    failed: usize,
}

impl ScanTally {
    fn add(&mut self, outcome: &ScanOutcome) {
        match outcome {
            ScanOutcome::Recorded { .. } => self.recorded += 1,
            ScanOutcome::Unmatched(_) => self.unmatched += 1,
            ScanOutcome::Duplicate { .. } => self.duplicate += 1,
        }
    }
}

impl std::fmt::Display for ScanTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} recorded, {} unmatched, {} duplicate, {} failed",
            self.recorded, self.unmatched, self.duplicate, self.failed
        )
    }
}

fn open_store(args: &StoreArgs) -> Result<Box<dyn RecordStore>, CardmatchError> {
    if let Some(remote) = open_remote_store(args)? {
        return Ok(remote);
    }

    let path = args.roster.as_ref().ok_or(CardmatchError::MissingStore)?;
    let roster = store::roster::read_roster(path)?;
    info!(path = %path.display(), records = roster.len(), "roster loaded");
    Ok(Box::new(roster))
}

#[cfg(feature = "remote")]
fn open_remote_store(args: &StoreArgs) -> Result<Option<Box<dyn RecordStore>>, CardmatchError> {
    let Some(url) = &args.remote_url else {
        return Ok(None);
    };
    info!(url = %url, "using remote roster");
    let remote = store::remote::RestStore::new(url, args.api_key.clone())?;
    Ok(Some(Box::new(remote)))
}

#[cfg(not(feature = "remote"))]
fn open_remote_store(_args: &StoreArgs) -> Result<Option<Box<dyn RecordStore>>, CardmatchError> {
    Ok(None)
}

fn millis(flag: &'static str, value: u64) -> Result<Duration, CardmatchError> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_milliseconds)
        .ok_or(CardmatchError::DurationOutOfRange { flag, value })
}

fn load_plan(args: &StoreArgs) -> Result<ProbePlan, CardmatchError> {
    match &args.plan {
        Some(path) => lookup::read_plan_yaml(path),
        None => Ok(ProbePlan::default()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CardmatchError> {
    serde_json::to_string_pretty(value).map_err(CardmatchError::ReportJson)
}
