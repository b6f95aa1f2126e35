//! Statutory milestone schedule.
//!
//! One canonical list covers the full Phase 1 and Phase 2 review. The
//! Phase-1-only schedule is the prefix of that list up to and including the
//! Phase 1 determination, so it can never drift from the full schedule.

use serde::{Deserialize, Serialize};

/// Name of the milestone that closes Phase 1.
pub const PHASE_1_DETERMINATION: &str = "Phase 1 determination";

/// Name of the milestone that closes Phase 2.
pub const PHASE_2_DETERMINATION: &str = "Phase 2 determination";

/// Business-day offset of the Phase 1 determination.
/// Milestones after this offset belong to Phase 2.
pub const PHASE_1_DETERMINATION_OFFSET: u32 = 30;

/// A named milestone at a fixed business-day offset from filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: &'static str,
    pub business_day_offset: u32,
}

impl Milestone {
    const fn new(name: &'static str, business_day_offset: u32) -> Self {
        Self {
            name,
            business_day_offset,
        }
    }

    /// Whether this milestone closes a review phase.
    pub fn is_determination(&self) -> bool {
        is_determination(self.name)
    }
}

/// Every milestone, in strictly increasing offset order.
const MILESTONES: [Milestone; 8] = [
    Milestone::new("Market Feedback Due", 15),
    Milestone::new("Phase 1 Issues Update", 20),
    Milestone::new(PHASE_1_DETERMINATION, PHASE_1_DETERMINATION_OFFSET),
    Milestone::new("Notice of Competition Concerns", 55),
    Milestone::new("Response to Notice Due", 80),
    Milestone::new("Phase 2 Commitments Deadline", 90),
    Milestone::new("Final Submissions Due", 105),
    Milestone::new(PHASE_2_DETERMINATION, 120),
];

/// Which review phases the schedule covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseOption {
    /// Phase 1 only.
    #[serde(rename = "phase1")]
    Phase1,

    /// Phase 1 followed by Phase 2.
    #[default]
    #[serde(rename = "phase1and2")]
    Phase1And2,
}

impl PhaseOption {
    pub fn label(self) -> &'static str {
        match self {
            Self::Phase1 => "phase1",
            Self::Phase1And2 => "phase1and2",
        }
    }
}

/// Whether a milestone at `offset` belongs to Phase 1.
pub fn is_phase1_milestone(offset: u32) -> bool {
    offset <= PHASE_1_DETERMINATION_OFFSET
}

/// Whether `name` is a Phase 1 or Phase 2 determination.
pub fn is_determination(name: &str) -> bool {
    name == PHASE_1_DETERMINATION || name == PHASE_2_DETERMINATION
}

/// The ordered milestone list for a phase option.
pub fn schedule(phase: PhaseOption) -> &'static [Milestone] {
    match phase {
        PhaseOption::Phase1 => {
            let end = MILESTONES.partition_point(|m| is_phase1_milestone(m.business_day_offset));
            &MILESTONES[..end]
        }
        PhaseOption::Phase1And2 => &MILESTONES,
    }
}
