//! Export document: the data behind a printable two-page report.
//!
//! Page one carries the visual timeline and the table rows. Page two echoes
//! the input parameters and the total, so a reader can reproduce the run.
//! Rendering is left to whatever consumes the JSON.

use jiff::civil::Date;
use serde::Serialize;

use crate::model::{Timeline, TimelineInputs};
use crate::projection::{Chart, ResultRow, to_chart_markers, to_result_rows};

/// A complete export, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub generated_on: Date,
    pub pages: [Page; 2],
}

/// One page of the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    /// The visual timeline plus the table.
    Timeline {
        chart: Option<Chart>,
        rows: Vec<ResultRow>,
    },

    /// The raw inputs and the total.
    Parameters(ParameterSummary),
}

/// The inputs as they were applied, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSummary {
    pub filing_date: Option<Date>,
    pub phase: &'static str,
    pub pre_assessment_days: u32,
    pub stop_clock_enabled: bool,
    pub stop_clock_start: Option<Date>,
    pub stop_clock_days: Option<u32>,
    pub commitments_enabled: bool,
    pub commitments_phase: Option<&'static str>,
    pub commitments_days: Option<u32>,
    pub total_business_days: i64,
}

impl ParameterSummary {
    pub fn new(inputs: &TimelineInputs, timeline: &Timeline) -> Self {
        Self {
            filing_date: inputs.filing_date,
            phase: inputs.phase.label(),
            pre_assessment_days: inputs.pre_assessment.map_or(0, |p| p.lead_business_days),
            stop_clock_enabled: inputs.stop_clock.is_some(),
            stop_clock_start: inputs.stop_clock.map(|s| s.start_date),
            stop_clock_days: inputs.stop_clock.map(|s| s.duration_business_days),
            commitments_enabled: inputs.commitments.is_some(),
            commitments_phase: inputs.commitments.map(|c| c.phase.label()),
            commitments_days: inputs.commitments.map(|c| c.duration_business_days),
            total_business_days: timeline.total_business_days,
        }
    }
}

/// Builds the export from the same timeline the table and chart display.
pub fn build(inputs: &TimelineInputs, timeline: &Timeline, today: Date) -> ExportDocument {
    ExportDocument {
        generated_on: today,
        pages: [
            Page::Timeline {
                chart: to_chart_markers(&timeline.events, today),
                rows: to_result_rows(&timeline.events),
            },
            Page::Parameters(ParameterSummary::new(inputs, timeline)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::calendar::Calendar;
    use crate::compose::compose;
    use crate::model::{Commitments, CommitmentsPhase, PreAssessment, StopClock};
    use crate::schedule::PhaseOption;

    fn inputs() -> TimelineInputs {
        TimelineInputs {
            filing_date: Some(date(2026, 1, 5)),
            phase: PhaseOption::Phase1And2,
            pre_assessment: Some(PreAssessment {
                lead_business_days: 5,
            }),
            stop_clock: Some(StopClock {
                start_date: date(2026, 1, 20),
                duration_business_days: 10,
            }),
            commitments: Some(Commitments {
                phase: CommitmentsPhase::Phase1,
                duration_business_days: 10,
            }),
        }
    }

    #[test]
    fn timeline_page_matches_projection() {
        let today = date(2026, 3, 1);
        let inputs = inputs();
        let timeline = compose(&Calendar::australia(), &inputs, today);
        let doc = build(&inputs, &timeline, today);

        let Page::Timeline { chart, rows } = &doc.pages[0] else {
            panic!("first page should be the timeline");
        };
        assert_eq!(rows, &to_result_rows(&timeline.events));
        assert_eq!(chart, &to_chart_markers(&timeline.events, today));
    }

    #[test]
    fn parameters_page_echoes_inputs() {
        let today = date(2026, 3, 1);
        let inputs = inputs();
        let timeline = compose(&Calendar::australia(), &inputs, today);
        let doc = build(&inputs, &timeline, today);

        let Page::Parameters(summary) = &doc.pages[1] else {
            panic!("second page should be the parameters");
        };
        assert_eq!(summary.filing_date, Some(date(2026, 1, 5)));
        assert_eq!(summary.phase, "phase1and2");
        assert_eq!(summary.pre_assessment_days, 5);
        assert!(summary.stop_clock_enabled);
        assert_eq!(summary.stop_clock_start, Some(date(2026, 1, 20)));
        assert_eq!(summary.stop_clock_days, Some(10));
        assert!(summary.commitments_enabled);
        assert_eq!(summary.commitments_phase, Some("phase1"));
        assert_eq!(summary.commitments_days, Some(10));
        assert_eq!(summary.total_business_days, 145);
    }

    #[test]
    fn serializes_with_page_tags() {
        let today = date(2026, 3, 1);
        let inputs = inputs();
        let timeline = compose(&Calendar::australia(), &inputs, today);
        let json = serde_json::to_value(build(&inputs, &timeline, today)).unwrap();

        assert_eq!(json["generatedOn"], "2026-03-01");
        assert_eq!(json["pages"][0]["page"], "timeline");
        assert_eq!(json["pages"][1]["page"], "parameters");
        assert_eq!(json["pages"][1]["totalBusinessDays"], 145);
        assert_eq!(json["pages"][1]["stopClockEnabled"], true);
    }

    #[test]
    fn empty_inputs_export_without_chart() {
        let today = date(2026, 3, 1);
        let inputs = TimelineInputs::default();
        let timeline = compose(&Calendar::australia(), &inputs, today);
        let doc = build(&inputs, &timeline, today);

        let Page::Timeline { chart, rows } = &doc.pages[0] else {
            panic!("first page should be the timeline");
        };
        assert!(chart.is_none());
        assert!(rows.is_empty());
    }
}
