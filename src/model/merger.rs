//! Merger record types: the unit tracked by the record store.

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A merger under (or past) regulatory review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merger {
    pub id: Uuid,
    pub name: String,
    pub filing_date: Date,

    /// Denormalized copy of the latest status change.
    pub status: MergerStatus,

    /// Set once the review has moved into Phase 2.
    pub has_phase_2: bool,

    pub created_at: Timestamp,
}

/// Where a merger stands in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergerStatus {
    /// Under Phase 1 assessment.
    Phase1,

    /// Under Phase 2 assessment.
    Phase2,

    Approved,
    ApprovedWithCommitments,
    NotApproved,
    Withdrawn,
}

impl MergerStatus {
    /// The stored label, e.g. `approved-with-commitments`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Phase1 => "phase1",
            Self::Phase2 => "phase2",
            Self::Approved => "approved",
            Self::ApprovedWithCommitments => "approved-with-commitments",
            Self::NotApproved => "not-approved",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parses a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            Self::Phase1,
            Self::Phase2,
            Self::Approved,
            Self::ApprovedWithCommitments,
            Self::NotApproved,
            Self::Withdrawn,
        ]
        .into_iter()
        .find(|s| s.label() == label)
    }

    /// Human-readable event name for a timeline.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Phase1 => "Phase 1 review opened",
            Self::Phase2 => "Moved to Phase 2",
            Self::Approved => "Determination: approved",
            Self::ApprovedWithCommitments => "Determination: approved with commitments",
            Self::NotApproved => "Determination: not approved",
            Self::Withdrawn => "Notification withdrawn",
        }
    }

    /// Whether review has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Phase1 | Self::Phase2)
    }
}

/// One row of a merger's status history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: MergerStatus,
    pub changed_on: Date,
}
