//! Mindcoach CLI - Command-line interface for Mindcoach Core
//!
//! Commands:
//! - schedule: Interpret a player's weekly schedule field
//! - rating: Build a player card from raw score samples
//! - doctor: Diagnose configuration and environment

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use chrono::{Local, NaiveDate};
use mindcoach_core::config::{AppConfig, MAINTENANCE_ENV_VAR};
use mindcoach_core::performance::{
    rate_player, ActivityRatingSample, BehaviourSample, BestSelfSample,
};
use mindcoach_core::schedule::{week_start, ParsedSchedule, ScheduleInterpreter};
use mindcoach_core::types::{Day, ScheduleEntry};
use mindcoach_core::{CoachError, PlayerCardEncoder, RouteGuard, COACH_VERSION, PRODUCER_NAME};

/// Mindcoach - schedule interpretation and player-card ratings
#[derive(Parser)]
#[command(name = "mindcoach")]
#[command(author = "Mindcoach")]
#[command(version = COACH_VERSION)]
#[command(about = "Interpret schedules and compute player-card ratings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a raw schedule field (JSON object, JSON array or free text)
    Schedule {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Only print entries for this weekday (e.g. "monday", "tue"); "today" uses the local date
        #[arg(long)]
        today: Option<String>,

        /// Attach dates for the week starting on this Monday (YYYY-MM-DD, or "current")
        #[arg(long)]
        week_start: Option<String>,

        /// Include how the input was interpreted
        #[arg(long)]
        report: bool,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Build a player card from raw behaviour, activity and best-self samples
    Rating {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Configuration file to check
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CoachCliError> {
    match cli.command {
        Commands::Schedule {
            input,
            today,
            week_start,
            report,
            output_format,
        } => cmd_schedule(
            &input,
            today.as_deref(),
            week_start.as_deref(),
            report,
            output_format,
        ),

        Commands::Rating {
            input,
            output_format,
        } => cmd_rating(&input, output_format),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_schedule(
    input: &Path,
    today: Option<&str>,
    week_start_arg: Option<&str>,
    report: bool,
    output_format: OutputFormat,
) -> Result<(), CoachCliError> {
    let raw = read_input(input)?;
    let parsed = ScheduleInterpreter::parse_with_report(&raw);
    tracing::info!(
        source = ?parsed.source,
        entries = parsed.entries.len(),
        skipped = parsed.skipped,
        "interpreted schedule"
    );

    let mut entries = parsed.entries.clone();

    if let Some(day) = today {
        let day = resolve_day(day)?;
        entries = ScheduleInterpreter::today_entries(&entries, day);
    }

    if let Some(start) = week_start_arg {
        let monday = resolve_week_start(start)?;
        entries = ScheduleInterpreter::with_dates(&entries, monday);
    }

    let output = if report {
        format_output(
            &ScheduleReport {
                entries,
                interpretation: parsed,
            },
            &output_format,
        )?
    } else {
        format_output(&entries, &output_format)?
    };

    println!("{}", output);
    Ok(())
}

fn cmd_rating(input: &Path, output_format: OutputFormat) -> Result<(), CoachCliError> {
    let raw = read_input(input)?;
    let request: RatingRequest = serde_json::from_str(&raw)?;

    let card = rate_player(
        &request.profile.name,
        request.profile.avatar_url.as_deref(),
        &request.behaviour_samples,
        &request.activity_samples,
        &request.best_self_samples,
    );
    tracing::info!(
        overall_rating = card.overall_rating,
        has_data = card.has_data,
        "computed player card"
    );

    let payload = PlayerCardEncoder::new().encode(&card, request.profile.player_id);
    println!("{}", format_output(&payload, &output_format)?);
    Ok(())
}

fn cmd_doctor(config_path: Option<&Path>, json: bool) -> Result<(), CoachCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} {}", PRODUCER_NAME, COACH_VERSION),
    });

    // Check configuration file if provided
    let config = match config_path {
        Some(path) if !path.exists() => {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: format!("Config file {} does not exist, using defaults", path.display()),
            });
            AppConfig::default()
        }
        Some(path) => match AppConfig::load(path) {
            Ok(config) => {
                checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Ok,
                    message: format!("Config file {} is valid", path.display()),
                });
                config
            }
            Err(e) => {
                checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: e.to_string(),
                });
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    }
    .with_env_vars(std::env::vars());

    let guard = RouteGuard::new(&config);
    let home = guard.decide("/");
    checks.push(DoctorCheck {
        name: "maintenance".to_string(),
        status: if config.maintenance_mode {
            CheckStatus::Warning
        } else {
            CheckStatus::Ok
        },
        message: format!(
            "maintenance_mode={} ({} can override), '/' -> {:?}",
            config.maintenance_mode, MAINTENANCE_ENV_VAR, home
        ),
    });

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass input files with -i)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (-i - ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: COACH_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mindcoach Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CoachCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, CoachCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn resolve_day(arg: &str) -> Result<Day, CoachCliError> {
    use chrono::Datelike;

    if arg.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive().weekday().into());
    }
    Day::from_name(arg).ok_or_else(|| CoachCliError::InvalidArgument(format!("unknown weekday '{arg}'")))
}

fn resolve_week_start(arg: &str) -> Result<NaiveDate, CoachCliError> {
    if arg.eq_ignore_ascii_case("current") {
        return Ok(week_start(Local::now().date_naive()));
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map_err(|e| CoachError::InvalidDate(format!("{arg}: {e}")).into())
}

fn format_output<T: Serialize + ?Sized>(value: &T, format: &OutputFormat) -> Result<String, CoachCliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
    }
}

// Input types

#[derive(Deserialize)]
struct RatingRequest {
    profile: ProfileInput,
    #[serde(default)]
    behaviour_samples: Vec<BehaviourSample>,
    #[serde(default)]
    activity_samples: Vec<ActivityRatingSample>,
    #[serde(default)]
    best_self_samples: Vec<BestSelfSample>,
}

#[derive(Deserialize)]
struct ProfileInput {
    #[serde(default)]
    player_id: Option<Uuid>,
    name: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

// Error types

#[derive(Debug)]
enum CoachCliError {
    Io(io::Error),
    Core(CoachError),
    Json(serde_json::Error),
    InvalidArgument(String),
    DoctorFailed,
}

impl From<io::Error> for CoachCliError {
    fn from(e: io::Error) -> Self {
        CoachCliError::Io(e)
    }
}

impl From<CoachError> for CoachCliError {
    fn from(e: CoachError) -> Self {
        CoachCliError::Core(e)
    }
}

impl From<serde_json::Error> for CoachCliError {
    fn from(e: serde_json::Error) -> Self {
        CoachCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CoachCliError> for CliError {
    fn from(e: CoachCliError) -> Self {
        match e {
            CoachCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CoachCliError::Core(e) => CliError {
                code: "INPUT_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            CoachCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax against the rating input format".to_string()),
            },
            CoachCliError::InvalidArgument(msg) => CliError {
                code: "INVALID_ARGUMENT".to_string(),
                message: msg,
                hint: Some("Run 'mindcoach --help' for usage".to_string()),
            },
            CoachCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ScheduleReport {
    entries: Vec<ScheduleEntry>,
    interpretation: ParsedSchedule,
}

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
