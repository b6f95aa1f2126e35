//! Timeline types: composer inputs and the events it produces.

use jiff::civil::Date;
use serde::Serialize;

use crate::schedule::PhaseOption;

/// Validated inputs for one timeline computation.
///
/// Built at the input boundary (see `params`); the composer trusts these
/// values and does not re-check ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineInputs {
    /// No filing date means nothing to compute.
    pub filing_date: Option<Date>,
    pub phase: PhaseOption,
    pub pre_assessment: Option<PreAssessment>,
    pub stop_clock: Option<StopClock>,
    pub commitments: Option<Commitments>,
}

/// Informal pre-assessment ending on the filing date.
///
/// Shown on the timeline and added to the total; never moves a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreAssessment {
    pub lead_business_days: u32,
}

/// A period during which the statutory clock is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopClock {
    /// Must not be before the filing date.
    pub start_date: Date,
    pub duration_business_days: u32,
}

/// Extension triggered by commitments offered during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitments {
    pub phase: CommitmentsPhase,
    /// Between 1 and 15 inclusive.
    pub duration_business_days: u32,
}

/// The phase in which commitments were offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitmentsPhase {
    Phase1,
    Phase2,
}

impl CommitmentsPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Phase1 => "phase1",
            Self::Phase2 => "phase2",
        }
    }
}

/// Markers distinguishing special events from ordinary milestones.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFlags {
    pub is_stop_clock_start: bool,
    pub is_stop_clock_end: bool,
    pub is_phase_decision: bool,
    pub is_pre_assessment: bool,
}

/// One dated point on a computed timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub event_name: String,

    /// Business days from filing, including any stop-clock and commitments
    /// days. Negative for pre-assessment.
    pub business_day_offset: i64,

    pub date: Date,
    pub weekday_name: String,
    pub flags: EventFlags,

    /// Commitments days added to this event, if any.
    pub extension_days_applied: Option<u32>,

    /// Whether `date` is before the `today` the timeline was computed for.
    pub is_in_past: bool,
}

/// A composed timeline: events in date order plus the elapsed total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    pub total_business_days: i64,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finds an event by name.
    pub fn event(&self, name: &str) -> Option<&TimelineEvent> {
        self.events.iter().find(|e| e.event_name == name)
    }
}
