//! Merger record commands: new, list, status, timeline.

use clap::{Subcommand, ValueEnum};
use jiff::Timestamp;
use jiff::civil::Date;
use uuid::Uuid;

use crate::calendar::is_weekend;
use crate::config::Config;
use crate::history::reconstruct;
use crate::model::{Merger, MergerStatus};
use crate::storage::Storage;

use super::format::{format_merger, format_timeline};
use super::print_json;

#[derive(Debug, Subcommand)]
pub enum MergerCommand {
    /// Record a new merger. Prints the merger ID.
    New {
        /// Parties or transaction name (e.g. "Acme / Widget Co").
        #[arg(long)]
        name: String,

        /// Filing date (YYYY-MM-DD).
        #[arg(long)]
        filing: Date,
    },

    /// List recorded mergers.
    List,

    /// Record a status change.
    Status {
        /// Merger ID: full UUID or unambiguous prefix (e.g. `a3b`).
        #[arg(long)]
        merger: String,

        /// The new status.
        #[arg(value_enum)]
        status: StatusArg,

        /// When the change happened. Defaults to today.
        #[arg(long)]
        on: Option<Date>,
    },

    /// Show the timeline rebuilt from a merger's status history.
    Timeline {
        /// Merger ID: full UUID or unambiguous prefix (e.g. `a3b`).
        #[arg(long)]
        merger: String,

        /// Print the timeline as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// CLI-facing merger status, mapped to the domain `MergerStatus`.
#[derive(Debug, Clone, ValueEnum)]
pub enum StatusArg {
    /// Under Phase 1 assessment.
    Phase1,
    /// Under Phase 2 assessment.
    Phase2,
    /// Approved without conditions.
    Approved,
    /// Approved subject to commitments.
    ApprovedWithCommitments,
    /// Not approved.
    NotApproved,
    /// Notification withdrawn by the parties.
    Withdrawn,
}

impl StatusArg {
    fn to_domain(&self) -> MergerStatus {
        match self {
            Self::Phase1 => MergerStatus::Phase1,
            Self::Phase2 => MergerStatus::Phase2,
            Self::Approved => MergerStatus::Approved,
            Self::ApprovedWithCommitments => MergerStatus::ApprovedWithCommitments,
            Self::NotApproved => MergerStatus::NotApproved,
            Self::Withdrawn => MergerStatus::Withdrawn,
        }
    }
}

pub(super) fn run(config: &Config, command: MergerCommand, today: Date) -> Result<(), String> {
    let storage = open_storage(config)?;

    match command {
        MergerCommand::New { name, filing } => cmd_new(&storage, &name, filing),
        MergerCommand::List => cmd_list(&storage),
        MergerCommand::Status { merger, status, on } => {
            let merger = resolve_merger(&storage, &merger)?;
            cmd_status(&storage, &merger, status.to_domain(), on.unwrap_or(today))
        }
        MergerCommand::Timeline { merger, json } => {
            let merger = resolve_merger(&storage, &merger)?;
            cmd_timeline(&storage, &merger, today, json)
        }
    }
}

fn open_storage(config: &Config) -> Result<Storage, String> {
    let path = match &config.database {
        Some(path) => path.clone(),
        None => Storage::default_path().ok_or("could not determine home directory")?,
    };
    Storage::open(&path).map_err(|e| format!("failed to open {}: {e}", path.display()))
}

fn cmd_new(storage: &Storage, name: &str, filing: Date) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("merger name cannot be empty".to_string());
    }
    if is_weekend(filing) {
        return Err(format!("filing date {filing} falls on a weekend"));
    }

    let merger = Merger {
        id: Uuid::new_v4(),
        name: name.to_string(),
        filing_date: filing,
        status: MergerStatus::Phase1,
        has_phase_2: false,
        created_at: Timestamp::now(),
    };

    storage
        .create_merger(&merger)
        .map_err(|e| format!("failed to create merger: {e}"))?;

    println!("{}", merger.id);
    Ok(())
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let mergers = storage
        .list_mergers()
        .map_err(|e| format!("failed to list mergers: {e}"))?;

    if mergers.is_empty() {
        println!("No mergers");
        return Ok(());
    }

    for m in &mergers {
        println!("{}", format_merger(m));
    }
    Ok(())
}

fn cmd_status(
    storage: &Storage,
    merger: &Merger,
    status: MergerStatus,
    on: Date,
) -> Result<(), String> {
    if on < merger.filing_date {
        return Err(format!(
            "status date {on} is before the filing date {}",
            merger.filing_date
        ));
    }
    if merger.status.is_terminal() {
        return Err(format!(
            "merger {} is already decided ({})",
            &merger.id.to_string()[..8],
            merger.status.label()
        ));
    }

    let updated = storage
        .record_status(merger.id, status, on)
        .map_err(|e| format!("failed to record status: {e}"))?;

    eprintln!("{}", format_merger(&updated));
    Ok(())
}

fn cmd_timeline(storage: &Storage, merger: &Merger, today: Date, json: bool) -> Result<(), String> {
    let history = storage
        .load_history(merger.id)
        .map_err(|e| format!("failed to load history: {e}"))?;
    let timeline = reconstruct(merger, &history, today);

    if json {
        return print_json(&timeline);
    }

    eprintln!("{}", format_merger(merger));
    println!("{}", format_timeline(&timeline));
    Ok(())
}

/// Resolve a merger reference (full UUID or unambiguous prefix) to a merger.
fn resolve_merger(storage: &Storage, reference: &str) -> Result<Merger, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_merger(id)
            .map_err(|e| format!("merger not found: {e}"));
    }

    // Try as a prefix match against all mergers.
    let mergers = storage
        .list_mergers()
        .map_err(|e| format!("failed to list mergers: {e}"))?;

    let matches: Vec<&Merger> = mergers
        .iter()
        .filter(|m| m.id.to_string().starts_with(reference))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no merger matching '{reference}'")),
        [only] => Ok((*only).clone()),
        many => {
            let ids: Vec<String> = many
                .iter()
                .map(|m| m.id.to_string()[..8].to_string())
                .collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {} mergers: {}",
                many.len(),
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path().join("mergers.sqlite")).unwrap();
        (dir, storage)
    }

    fn stored_merger(storage: &Storage, id: &str) -> Merger {
        let merger = Merger {
            id: Uuid::parse_str(id).unwrap(),
            name: "Acme / Widget Co".into(),
            filing_date: date(2026, 1, 5),
            status: MergerStatus::Phase1,
            has_phase_2: false,
            created_at: Timestamp::now(),
        };
        storage.create_merger(&merger).unwrap();
        merger
    }

    #[test]
    fn resolves_full_id_and_unique_prefix() {
        let (_dir, storage) = test_storage();
        let merger = stored_merger(&storage, "a3b0fc12-0000-4000-8000-000000000000");

        let by_id = resolve_merger(&storage, &merger.id.to_string()).unwrap();
        assert_eq!(by_id.id, merger.id);
        let by_prefix = resolve_merger(&storage, "a3b").unwrap();
        assert_eq!(by_prefix.id, merger.id);
    }

    #[test]
    fn ambiguous_prefix_is_an_error() {
        let (_dir, storage) = test_storage();
        stored_merger(&storage, "a3b0fc12-0000-4000-8000-000000000000");
        stored_merger(&storage, "a3b1fc12-0000-4000-8000-000000000000");

        let err = resolve_merger(&storage, "a3b").unwrap_err();
        assert!(err.contains("ambiguous"), "{err}");
        assert!(resolve_merger(&storage, "a3b0").is_ok());
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        let (_dir, storage) = test_storage();
        let err = resolve_merger(&storage, "ffff").unwrap_err();
        assert_eq!(err, "no merger matching 'ffff'");
    }

    #[test]
    fn status_before_filing_rejected() {
        let (_dir, storage) = test_storage();
        let merger = stored_merger(&storage, "a3b0fc12-0000-4000-8000-000000000000");

        let on = date(2025, 12, 1);
        let err = cmd_status(&storage, &merger, MergerStatus::Phase2, on).unwrap_err();
        assert!(err.contains("before the filing date"), "{err}");
    }

    #[test]
    fn decided_merger_rejects_status() {
        let (_dir, storage) = test_storage();
        let merger = stored_merger(&storage, "a3b0fc12-0000-4000-8000-000000000000");
        let decided = storage
            .record_status(merger.id, MergerStatus::Approved, date(2026, 2, 17))
            .unwrap();

        let on = date(2026, 3, 1);
        let err = cmd_status(&storage, &decided, MergerStatus::Phase2, on).unwrap_err();
        assert!(err.contains("already decided"), "{err}");
    }

    #[test]
    fn new_rejects_weekend_filing() {
        let (_dir, storage) = test_storage();
        let err = cmd_new(&storage, "Acme", date(2026, 1, 3)).unwrap_err();
        assert_eq!(err, "filing date 2026-01-03 falls on a weekend");
        assert!(storage.list_mergers().unwrap().is_empty());
    }
}
