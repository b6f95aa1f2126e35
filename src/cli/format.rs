//! Output formatting for CLI display.

use std::fmt::Write;

use crate::model::{Merger, Timeline};
use crate::projection::{Chart, MarkerKind, ResultRow, StopClockEdge, to_result_rows};
use crate::schedule::Milestone;

/// Width of the ASCII chart axis, in characters.
const AXIS_WIDTH: usize = 60;

/// Format a timeline as a table followed by the total.
pub(super) fn format_timeline(timeline: &Timeline) -> String {
    let rows = to_result_rows(&timeline.events);
    let name_width = rows.iter().map(|r| r.event.len()).max().unwrap_or(0).max(5);

    let mut out = format!(
        "{:<name_width$}  {:>5}  {:<10}  {:<9}  Notes\n",
        "Event", "Day", "Date", "Weekday"
    );
    for row in &rows {
        let line = format!(
            "{:<name_width$}  {:>5}  {}  {:<9}  {}",
            row.event,
            row.business_day_offset,
            row.date,
            row.weekday,
            format_notes(row)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    let total = timeline.total_business_days;
    let _ = write!(out, "\nTotal business days: {total}");
    out
}

/// Annotations shown in the notes column.
pub(super) fn format_notes(row: &ResultRow) -> String {
    let mut notes = Vec::new();
    if row.is_pre_assessment {
        notes.push("pre-assessment".to_string());
    }
    match row.stop_clock {
        Some(StopClockEdge::Start) => notes.push("clock stopped".to_string()),
        Some(StopClockEdge::End) => notes.push("clock restarts".to_string()),
        None => {}
    }
    if row.is_phase_decision {
        notes.push("decision".to_string());
    }
    if let Some(days) = row.extension_days {
        notes.push(format!("+{days} commitments"));
    }
    if row.is_in_past {
        notes.push("past".to_string());
    }
    notes.join(", ")
}

/// Format chart markers as an ASCII axis plus one line per marker.
pub(super) fn format_chart(chart: &Chart) -> String {
    let mut axis = vec!['-'; AXIS_WIDTH + 1];
    let mut out = String::new();

    for marker in &chart.markers {
        let col = column(marker.position);
        axis[col] = match marker.kind {
            MarkerKind::Today => 'T',
            MarkerKind::Determination => '#',
            MarkerKind::StopClockStart | MarkerKind::StopClockEnd => '|',
            MarkerKind::PreAssessment | MarkerKind::Milestone => '*',
        };
        let _ = writeln!(
            out,
            "{:>5.1}%  {}  {}",
            marker.position * 100.0,
            marker.date,
            marker.label
        );
    }

    format!(
        "{}  {}  {}\n{out}",
        chart.range_start,
        axis.into_iter().collect::<String>(),
        chart.range_end
    )
}

/// Column on the axis for a fractional position.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn column(position: f64) -> usize {
    let col = (position.clamp(0.0, 1.0) * AXIS_WIDTH as f64).round() as usize;
    col.min(AXIS_WIDTH)
}

/// Format a milestone schedule, one milestone per line.
pub(super) fn format_schedule(milestones: &[Milestone]) -> String {
    milestones
        .iter()
        .map(|m| {
            let marker = if m.is_determination() { " *" } else { "" };
            format!("{:>4}  {}{marker}", m.business_day_offset, m.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of a merger for listings.
pub(super) fn format_merger(merger: &Merger) -> String {
    let short_id = &merger.id.to_string()[..8];
    let phase_2 = if merger.has_phase_2 { " [phase 2]" } else { "" };
    format!(
        "{short_id}  [{}]{phase_2}  filed {}  {}",
        merger.status.label(),
        merger.filing_date,
        merger.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use jiff::civil::date;
    use uuid::Uuid;

    use crate::calendar::Calendar;
    use crate::compose::compose;
    use crate::model::{Commitments, CommitmentsPhase, MergerStatus, TimelineInputs};
    use crate::projection::to_chart_markers;
    use crate::schedule::{PhaseOption, schedule};

    fn timeline() -> Timeline {
        let inputs = TimelineInputs {
            filing_date: Some(date(2026, 1, 5)),
            phase: PhaseOption::Phase1,
            commitments: Some(Commitments {
                phase: CommitmentsPhase::Phase1,
                duration_business_days: 10,
            }),
            ..TimelineInputs::default()
        };
        compose(&Calendar::australia(), &inputs, date(2026, 1, 20))
    }

    #[test]
    fn timeline_table_has_header_rows_and_total() {
        let out = format_timeline(&timeline());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Event"));
        assert!(lines[1].starts_with("Filing Date"));
        assert!(lines[1].ends_with("past"));
        assert!(lines[4].contains("2026-03-03"));
        assert!(lines[4].ends_with("decision, +10 commitments"));
        assert_eq!(*lines.last().unwrap(), "Total business days: 40");
    }

    #[test]
    fn notes_for_plain_row_are_empty() {
        let rows = to_result_rows(&timeline().events);
        assert_eq!(format_notes(&rows[2]), "");
    }

    #[test]
    fn chart_has_axis_and_today() {
        let timeline = timeline();
        let chart = to_chart_markers(&timeline.events, date(2026, 1, 20)).unwrap();
        let out = format_chart(&chart);
        let axis = out.lines().next().unwrap();

        assert!(axis.starts_with("2025-12-26"));
        assert!(axis.ends_with("2026-03-13"));
        assert!(axis.contains('T'));
        assert!(axis.contains('#'));
        assert!(out.contains("Today"));
    }

    #[test]
    fn column_is_clamped() {
        assert_eq!(column(0.0), 0);
        assert_eq!(column(1.0), AXIS_WIDTH);
        assert_eq!(column(1.5), AXIS_WIDTH);
        assert_eq!(column(-0.5), 0);
    }

    #[test]
    fn schedule_marks_determinations() {
        let out = format_schedule(schedule(PhaseOption::Phase1));
        assert_eq!(
            out,
            "  15  Market Feedback Due\n  20  Phase 1 Issues Update\n  30  Phase 1 determination *"
        );
    }

    #[test]
    fn merger_line() {
        let merger = Merger {
            id: Uuid::parse_str("a3b0fc12-0000-4000-8000-000000000000").unwrap(),
            name: "Acme / Widget Co".into(),
            filing_date: date(2026, 1, 5),
            status: MergerStatus::Phase2,
            has_phase_2: true,
            created_at: Timestamp::now(),
        };
        assert_eq!(
            format_merger(&merger),
            "a3b0fc12  [phase2] [phase 2]  filed 2026-01-05  Acme / Widget Co"
        );
    }
}
