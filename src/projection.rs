//! Projections of a composed timeline into display shapes.
//!
//! Rows feed the tabular view. Chart markers feed the visual timeline: each
//! marker sits at a fractional position within a date range padded by ten
//! calendar days on either side of the first and last events.

use jiff::ToSpan;
use jiff::civil::Date;
use serde::Serialize;

use crate::model::TimelineEvent;

/// Calendar days of padding on each side of the chart range.
const CHART_PADDING_DAYS: i32 = 10;

pub const TODAY_LABEL: &str = "Today";

/// One row of the tabular view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub event: String,
    pub business_day_offset: i64,
    pub date: Date,
    pub weekday: String,
    pub extension_days: Option<u32>,
    pub stop_clock: Option<StopClockEdge>,
    pub is_phase_decision: bool,
    pub is_pre_assessment: bool,
    pub is_in_past: bool,
}

/// Which end of a stop-clock period a row marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopClockEdge {
    Start,
    End,
}

/// How a chart marker should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    PreAssessment,
    Milestone,
    Determination,
    StopClockStart,
    StopClockEnd,
    Today,
}

/// A point on the visual timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMarker {
    pub label: String,
    pub date: Date,
    pub kind: MarkerKind,

    /// Fraction of the chart range, `0.0` at the left edge and `1.0` at the right.
    pub position: f64,

    /// `None` for the today marker.
    pub business_day_offset: Option<i64>,
    pub extension_days: Option<u32>,
    pub is_in_past: bool,
}

/// Chart markers plus the padded range they are positioned within.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub range_start: Date,
    pub range_end: Date,
    pub markers: Vec<ChartMarker>,
}

/// Projects events into table rows, preserving order.
pub fn to_result_rows(events: &[TimelineEvent]) -> Vec<ResultRow> {
    events
        .iter()
        .map(|e| ResultRow {
            event: e.event_name.clone(),
            business_day_offset: e.business_day_offset,
            date: e.date,
            weekday: e.weekday_name.clone(),
            extension_days: e.extension_days_applied,
            stop_clock: if e.flags.is_stop_clock_start {
                Some(StopClockEdge::Start)
            } else if e.flags.is_stop_clock_end {
                Some(StopClockEdge::End)
            } else {
                None
            },
            is_phase_decision: e.flags.is_phase_decision,
            is_pre_assessment: e.flags.is_pre_assessment,
            is_in_past: e.is_in_past,
        })
        .collect()
}

/// Projects date-ordered events into chart markers.
///
/// A today marker is inserted between the two adjacent events that strictly
/// bracket `today`. Returns `None` when there are no events.
pub fn to_chart_markers(events: &[TimelineEvent], today: Date) -> Option<Chart> {
    let first = events.first()?.date;
    let last = events.last()?.date;

    let range_start = first
        .checked_sub(CHART_PADDING_DAYS.days())
        .unwrap_or(first);
    let range_end = last.checked_add(CHART_PADDING_DAYS.days()).unwrap_or(last);
    let position = |date: Date| fraction(range_start, range_end, date);

    let mut markers = Vec::with_capacity(events.len() + 1);
    for (i, event) in events.iter().enumerate() {
        markers.push(ChartMarker {
            label: event.event_name.clone(),
            date: event.date,
            kind: marker_kind(event),
            position: position(event.date),
            business_day_offset: Some(event.business_day_offset),
            extension_days: event.extension_days_applied,
            is_in_past: event.is_in_past,
        });

        let brackets_today = events
            .get(i + 1)
            .is_some_and(|next| event.date < today && today < next.date);
        if brackets_today {
            markers.push(ChartMarker {
                label: TODAY_LABEL.to_string(),
                date: today,
                kind: MarkerKind::Today,
                position: position(today),
                business_day_offset: None,
                extension_days: None,
                is_in_past: false,
            });
        }
    }

    Some(Chart {
        range_start,
        range_end,
        markers,
    })
}

fn marker_kind(event: &TimelineEvent) -> MarkerKind {
    let flags = event.flags;
    if flags.is_pre_assessment {
        MarkerKind::PreAssessment
    } else if flags.is_stop_clock_start {
        MarkerKind::StopClockStart
    } else if flags.is_stop_clock_end {
        MarkerKind::StopClockEnd
    } else if flags.is_phase_decision {
        MarkerKind::Determination
    } else {
        MarkerKind::Milestone
    }
}

/// Position of `date` within `[start, end]` as a fraction.
fn fraction(start: Date, end: Date, date: Date) -> f64 {
    let days = |to: Date| start.until(to).map_or(0, |span| span.get_days());
    let total = days(end);
    if total == 0 {
        return 0.0;
    }
    f64::from(days(date)) / f64::from(total)
}
