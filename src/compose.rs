//! Timeline composition: the business-day regulatory timeline.
//!
//! Given a filing date and optional modifiers, produces every milestone with
//! its adjusted date. Modifiers apply in a fixed order per milestone:
//!
//! 1. **Stop clock.** Any milestone whose unshifted date falls on or after
//!    the stop-clock start moves forward by the stop-clock duration. The
//!    start/end markers are emitted once, alongside the first such milestone.
//! 2. **Commitments.** Phase 1 commitments extend the Phase 1 determination
//!    and carry forward to every later Phase 2 milestone. Phase 2 commitments
//!    extend only the Phase 2 determination.
//!
//! Both shifts are additive, so a milestone inside the stop-clock window that
//! is also the commitments target moves by the sum of the two.

use jiff::civil::Date;
use tracing::debug;

use crate::calendar::{Calendar, weekday_name};
use crate::model::{
    Commitments, CommitmentsPhase, EventFlags, StopClock, Timeline, TimelineEvent, TimelineInputs,
};
use crate::schedule::{
    Milestone, PHASE_1_DETERMINATION, PHASE_2_DETERMINATION, is_phase1_milestone, schedule,
};

pub const FILING_DATE: &str = "Filing Date";
pub const PRE_ASSESSMENT_START: &str = "Pre-Assessment Period Start";
pub const STOP_CLOCK_START: &str = "Stop Clock Start";
pub const STOP_CLOCK_END: &str = "Stop Clock End";

/// Composes the full timeline for `inputs`.
///
/// `today` only drives the `is_in_past` flag. Returns an empty timeline when
/// no filing date is set.
pub fn compose(calendar: &Calendar, inputs: &TimelineInputs, today: Date) -> Timeline {
    let Some(filing_date) = inputs.filing_date else {
        return Timeline::default();
    };

    let composer = Composer {
        calendar,
        filing_date,
        today,
        stop_clock: inputs.stop_clock,
        commitments: inputs.commitments,
    };

    let lead = inputs.pre_assessment.map_or(0, |p| p.lead_business_days);
    let mut events = Vec::new();

    if lead > 0 {
        let start = calendar.subtract_business_days(filing_date, lead);
        events.push(composer.event(
            PRE_ASSESSMENT_START,
            -i64::from(lead),
            start,
            EventFlags {
                is_pre_assessment: true,
                ..EventFlags::default()
            },
            None,
        ));
    }

    let filing = composer.event(FILING_DATE, 0, filing_date, EventFlags::default(), None);
    events.push(filing);

    let pass = schedule(inputs.phase)
        .iter()
        .fold(Pass::default(), |pass, m| composer.milestone(pass, m));
    events.extend(pass.events);

    // Stable: events sharing a date keep their emission order.
    events.sort_by_key(|e| e.date);

    let total_business_days = i64::from(lead) + events.last().map_or(0, |e| e.business_day_offset);

    Timeline {
        events,
        total_business_days,
    }
}

/// The milestone a commitments extension lands on.
fn commitments_target(phase: CommitmentsPhase) -> &'static str {
    match phase {
        CommitmentsPhase::Phase1 => PHASE_1_DETERMINATION,
        CommitmentsPhase::Phase2 => PHASE_2_DETERMINATION,
    }
}

/// Fixed context for one composition.
struct Composer<'a> {
    calendar: &'a Calendar,
    filing_date: Date,
    today: Date,
    stop_clock: Option<StopClock>,
    commitments: Option<Commitments>,
}

/// Accumulator threaded through the milestone fold.
#[derive(Default)]
struct Pass {
    events: Vec<TimelineEvent>,
    stop_clock_emitted: bool,

    /// Phase 1 commitments days still to apply to Phase 2 milestones.
    carry_days: Option<u32>,
}

impl Composer<'_> {
    fn milestone(&self, mut pass: Pass, milestone: &Milestone) -> Pass {
        let calendar = self.calendar;
        let base_offset = milestone.business_day_offset;
        let base_date = calendar.add_business_days(self.filing_date, base_offset);

        let mut date = base_date;
        let mut offset = i64::from(base_offset);

        if let Some(stop) = self.stop_clock.filter(|s| base_date >= s.start_date) {
            if !pass.stop_clock_emitted {
                debug!(milestone = milestone.name, start = %stop.start_date, "stop clock engaged");
                pass.events.extend(self.stop_clock_events(stop));
                pass.stop_clock_emitted = true;
            }
            date = calendar.add_business_days(date, stop.duration_business_days);
            offset += i64::from(stop.duration_business_days);
        }

        let extension = match self.commitments {
            Some(c) if milestone.name == commitments_target(c.phase) => {
                if c.phase == CommitmentsPhase::Phase1 {
                    pass.carry_days = Some(c.duration_business_days);
                }
                Some(c.duration_business_days)
            }
            _ if is_phase1_milestone(base_offset) => None,
            _ => pass.carry_days,
        };

        if let Some(days) = extension {
            debug!(milestone = milestone.name, days, "commitments applied");
            date = calendar.add_business_days(date, days);
            offset += i64::from(days);
        }

        let flags = EventFlags {
            is_phase_decision: milestone.is_determination(),
            ..EventFlags::default()
        };
        pass.events
            .push(self.event(milestone.name, offset, date, flags, extension));
        pass
    }

    /// The start and end markers for a stop-clock period.
    fn stop_clock_events(&self, stop: StopClock) -> [TimelineEvent; 2] {
        let start_offset = self
            .calendar
            .business_days_between(self.filing_date, stop.start_date);
        let end_date = self
            .calendar
            .add_business_days(stop.start_date, stop.duration_business_days);

        [
            self.event(
                STOP_CLOCK_START,
                start_offset,
                stop.start_date,
                EventFlags {
                    is_stop_clock_start: true,
                    ..EventFlags::default()
                },
                None,
            ),
            self.event(
                STOP_CLOCK_END,
                start_offset + i64::from(stop.duration_business_days),
                end_date,
                EventFlags {
                    is_stop_clock_end: true,
                    ..EventFlags::default()
                },
                None,
            ),
        ]
    }

    fn event(
        &self,
        name: &str,
        business_day_offset: i64,
        date: Date,
        flags: EventFlags,
        extension_days_applied: Option<u32>,
    ) -> TimelineEvent {
        TimelineEvent {
            event_name: name.to_string(),
            business_day_offset,
            date,
            weekday_name: weekday_name(date),
            flags,
            extension_days_applied,
            is_in_past: date < self.today,
        }
    }
}
