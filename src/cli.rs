//! CLI interface.
//!
//! Each subcommand is non-interactive: arguments in, table or JSON out.
//! Tables go to stdout; status messages and logs go to stderr.
//!
//! Commands split into three groups:
//!
//! - `timeline`, `chart`, `export` compute a business-day timeline from
//!   command-line parameters. Nothing is stored.
//! - `schedule` and `days` expose the milestone schedule and the calendar
//!   arithmetic directly.
//! - `merger new|list|status|timeline` work with stored merger records.

mod format;
mod merger;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::Zoned;
use jiff::civil::Date;
use serde::Serialize;

use crate::calendar::weekday_name;
use crate::compose::compose;
use crate::config::Config;
use crate::export;
use crate::model::{CommitmentsPhase, Timeline, TimelineInputs};
use crate::params::TimelineParameters;
use crate::projection::{ResultRow, to_chart_markers, to_result_rows};
use crate::schedule::{PHASE_1_DETERMINATION, PHASE_2_DETERMINATION, PhaseOption, schedule};

use format::{format_chart, format_schedule, format_timeline};
use merger::MergerCommand;

/// Merger Timeline: business-day regulatory timelines for merger reviews.
#[derive(Debug, Parser)]
#[command(name = "merger-timeline", version, after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Treat this date as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    today: Option<Date>,

    #[command(subcommand)]
    pub command: Command,
}

const EXAMPLES_HELP: &str = r#"Examples:
  merger-timeline timeline --filing 2026-01-05
  merger-timeline timeline --filing 2026-01-05 --stop-clock-start 2026-01-20 --stop-clock-days 10
  merger-timeline timeline --filing 2026-01-05 --commitments-phase phase1 --commitments-days 10
  merger-timeline export --filing 2026-01-05 --pre-assessment 20 --out timeline.json

Records:
  merger-timeline merger new --name "Acme / Widget Co" --filing 2026-01-05
  merger-timeline merger status --merger a3b phase2 --on 2026-02-17
  merger-timeline merger timeline --merger a3b"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a timeline and print it as a table.
    Timeline {
        #[command(flatten)]
        params: TimelineArgs,

        /// Print rows and total as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Compute a timeline and print its chart markers.
    Chart {
        #[command(flatten)]
        params: TimelineArgs,

        /// Print the chart as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute a timeline and write the two-page export document.
    ///
    /// The document is JSON, written to `--out` (if given) or stdout.
    Export {
        #[command(flatten)]
        params: TimelineArgs,

        /// Write the export to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the milestone schedule.
    Schedule {
        /// Which schedule to print. Defaults to the configured phase option.
        #[arg(long, value_enum)]
        phase: Option<PhaseArg>,
    },

    /// Business-day arithmetic on the configured calendar.
    Days {
        #[command(subcommand)]
        command: DaysCommand,
    },

    /// Manage stored merger records.
    Merger {
        #[command(subcommand)]
        command: MergerCommand,
    },
}

/// Timeline parameters shared by `timeline`, `chart`, and `export`.
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Filing date (YYYY-MM-DD). Must be a weekday.
    #[arg(long)]
    filing: Option<Date>,

    /// Schedule to use. Defaults to the configured phase option.
    #[arg(long, value_enum)]
    phase: Option<PhaseArg>,

    /// Pre-assessment lead time in business days.
    #[arg(long, value_name = "DAYS")]
    pre_assessment: Option<u32>,

    /// First day of the stop-clock period (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", requires = "stop_clock_days")]
    stop_clock_start: Option<Date>,

    /// Length of the stop-clock period in business days.
    #[arg(long, value_name = "DAYS", requires = "stop_clock_start")]
    stop_clock_days: Option<u32>,

    /// Phase in which commitments were offered.
    #[arg(long, value_enum, requires = "commitments_days")]
    commitments_phase: Option<CommitmentsPhaseArg>,

    /// Commitments extension in business days (clamped to 1–15).
    #[arg(long, value_name = "DAYS", requires = "commitments_phase")]
    commitments_days: Option<u32>,
}

impl TimelineArgs {
    fn to_parameters(&self, config: &Config) -> TimelineParameters {
        TimelineParameters {
            filing_date: self.filing,
            phase: self
                .phase
                .as_ref()
                .map_or(config.default_phase, PhaseArg::to_domain),
            pre_assessment_days: self.pre_assessment,
            stop_clock_start: self.stop_clock_start,
            stop_clock_days: self.stop_clock_days,
            commitments_phase: self
                .commitments_phase
                .as_ref()
                .map(CommitmentsPhaseArg::to_domain),
            commitments_days: self.commitments_days,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum DaysCommand {
    /// Is this date a business day?
    Check { date: Date },

    /// Move forward a number of business days.
    Add { date: Date, days: u32 },

    /// Move backward a number of business days.
    Subtract { date: Date, days: u32 },

    /// Count business days from one date to another.
    Between { from: Date, to: Date },
}

/// CLI-facing phase option, mapped to the domain `PhaseOption`.
#[derive(Debug, Clone, ValueEnum)]
pub enum PhaseArg {
    /// Phase 1 milestones only.
    Phase1,
    /// Phase 1 and Phase 2 milestones.
    #[value(name = "phase1and2")]
    Phase1And2,
}

impl PhaseArg {
    fn to_domain(&self) -> PhaseOption {
        match self {
            Self::Phase1 => PhaseOption::Phase1,
            Self::Phase1And2 => PhaseOption::Phase1And2,
        }
    }
}

/// CLI-facing commitments phase, mapped to the domain `CommitmentsPhase`.
#[derive(Debug, Clone, ValueEnum)]
pub enum CommitmentsPhaseArg {
    /// Extends the Phase 1 determination and every later milestone.
    Phase1,
    /// Extends the Phase 2 determination only.
    Phase2,
}

impl CommitmentsPhaseArg {
    fn to_domain(&self) -> CommitmentsPhase {
        match self {
            Self::Phase1 => CommitmentsPhase::Phase1,
            Self::Phase2 => CommitmentsPhase::Phase2,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Zoned::now().date());

    match cli.command {
        Command::Timeline { params, json } => cmd_timeline(config, &params, today, json),
        Command::Chart { params, json } => cmd_chart(config, &params, today, json),
        Command::Export { params, out } => cmd_export(config, &params, today, out),
        Command::Schedule { phase } => {
            let phase = phase
                .as_ref()
                .map_or(config.default_phase, PhaseArg::to_domain);
            println!("{}", format_schedule(schedule(phase)));
            Ok(())
        }
        Command::Days { command } => {
            cmd_days(config, &command);
            Ok(())
        }
        Command::Merger { command } => merger::run(config, command, today),
    }
}

/// JSON shape of `timeline --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineOutput {
    rows: Vec<ResultRow>,
    total_business_days: i64,
}

/// Validate parameters and compose the timeline they describe.
fn compute(
    config: &Config,
    args: &TimelineArgs,
    today: Date,
) -> Result<(TimelineInputs, Timeline), String> {
    let inputs = args
        .to_parameters(config)
        .validate()
        .map_err(|e| format!("invalid parameters: {e}"))?;
    let timeline = compose(&config.calendar(), &inputs, today);
    Ok((inputs, timeline))
}

fn cmd_timeline(
    config: &Config,
    args: &TimelineArgs,
    today: Date,
    json: bool,
) -> Result<(), String> {
    let (_, timeline) = compute(config, args, today)?;

    if json {
        return print_json(&TimelineOutput {
            rows: to_result_rows(&timeline.events),
            total_business_days: timeline.total_business_days,
        });
    }

    if timeline.is_empty() {
        eprintln!("Select a filing date with --filing to compute a timeline.");
        return Ok(());
    }

    println!("{}", format_timeline(&timeline));
    for name in [PHASE_1_DETERMINATION, PHASE_2_DETERMINATION] {
        if let Some(event) = timeline.event(name) {
            eprintln!("{name}: {} ({})", event.date, event.weekday_name);
        }
    }
    Ok(())
}

fn cmd_chart(config: &Config, args: &TimelineArgs, today: Date, json: bool) -> Result<(), String> {
    let (_, timeline) = compute(config, args, today)?;

    let Some(chart) = to_chart_markers(&timeline.events, today) else {
        eprintln!("Select a filing date with --filing to compute a timeline.");
        return Ok(());
    };

    if json {
        print_json(&chart)
    } else {
        print!("{}", format_chart(&chart));
        Ok(())
    }
}

fn cmd_export(
    config: &Config,
    args: &TimelineArgs,
    today: Date,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let (inputs, timeline) = compute(config, args, today)?;
    let document = export::build(&inputs, &timeline, today);

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| format!("failed to serialize export: {e}"))?;

    match out {
        Some(path) => {
            fs::write(&path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!(
                "Exported {} events ({} business days) → {}",
                timeline.events.len(),
                timeline.total_business_days,
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_days(config: &Config, command: &DaysCommand) {
    let calendar = config.calendar();

    match *command {
        DaysCommand::Check { date } => {
            let weekday = weekday_name(date);
            if calendar.is_business_day(date) {
                println!("{date} {weekday}: business day");
            } else if let Some(name) = calendar.holiday(date) {
                println!("{date} {weekday}: not a business day ({name})");
            } else {
                println!("{date} {weekday}: not a business day (weekend)");
            }
        }
        DaysCommand::Add { date, days } => {
            let result = calendar.add_business_days(date, days);
            println!("{result} {}", weekday_name(result));
        }
        DaysCommand::Subtract { date, days } => {
            let result = calendar.subtract_business_days(date, days);
            println!("{result} {}", weekday_name(result));
        }
        DaysCommand::Between { from, to } => {
            println!("{}", calendar.business_days_between(from, to));
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize: {e}"))?;
    println!("{json}");
    Ok(())
}
