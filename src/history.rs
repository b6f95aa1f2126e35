//! Timelines rebuilt from stored status history.
//!
//! Stored mergers only keep a status label, a Phase 2 flag, and the dated
//! status changes. This module turns those back into a timeline for
//! display. It counts weekdays only (holidays are ignored), so its offsets
//! can drift from the composed timeline by a few days; that is acceptable
//! for historical records.

use jiff::civil::Date;

use crate::calendar::{Calendar, weekday_name};
use crate::compose::FILING_DATE;
use crate::model::{EventFlags, Merger, StatusChange, Timeline, TimelineEvent};
use crate::schedule::{PHASE_1_DETERMINATION, PHASE_2_DETERMINATION, PhaseOption, schedule};

/// Suffix for determinations projected forward for open mergers.
pub const EXPECTED_SUFFIX: &str = " (expected)";

/// Rebuilds a merger's timeline from its status history.
///
/// Open mergers also get the expected date of their next determination.
pub fn reconstruct(merger: &Merger, history: &[StatusChange], today: Date) -> Timeline {
    let calendar = Calendar::weekends_only();
    let filing = merger.filing_date;
    let event = |name: String, date: Date, is_phase_decision: bool| TimelineEvent {
        event_name: name,
        business_day_offset: calendar.business_days_between(filing, date),
        date,
        weekday_name: weekday_name(date),
        flags: EventFlags {
            is_phase_decision,
            ..EventFlags::default()
        },
        extension_days_applied: None,
        is_in_past: date < today,
    };

    let mut events = vec![event(FILING_DATE.to_string(), filing, false)];

    events.extend(history.iter().map(|change| {
        event(
            change.status.event_name().to_string(),
            change.changed_on,
            change.status.is_terminal(),
        )
    }));

    if !merger.status.is_terminal() {
        // Once in Phase 2, the Phase 1 determination is already behind us.
        let pending = if merger.has_phase_2 {
            PHASE_2_DETERMINATION
        } else {
            PHASE_1_DETERMINATION
        };
        if let Some(m) = schedule(PhaseOption::Phase1And2)
            .iter()
            .find(|m| m.name == pending)
        {
            let date = calendar.add_business_days(filing, m.business_day_offset);
            events.push(event(format!("{}{EXPECTED_SUFFIX}", m.name), date, true));
        }
    }

    events.sort_by_key(|e| e.date);

    let total_business_days = events.last().map_or(0, |e| e.business_day_offset);
    Timeline {
        events,
        total_business_days,
    }
}
