//! Input boundary for timeline computation.
//!
//! Raw parameters arrive from the command line or an export request. They
//! are checked and clamped here so the composer can trust its inputs.

use jiff::civil::Date;
use tracing::warn;

use crate::calendar::is_weekend;
use crate::model::{Commitments, CommitmentsPhase, PreAssessment, StopClock, TimelineInputs};
use crate::schedule::PhaseOption;

/// Smallest commitments extension, in business days.
pub const MIN_COMMITMENTS_DAYS: u32 = 1;

/// Largest commitments extension, in business days.
pub const MAX_COMMITMENTS_DAYS: u32 = 15;

/// Reasons raw parameters cannot become timeline inputs.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("filing date {0} falls on a weekend")]
    FilingOnWeekend(Date),

    #[error("stop clock starts {start}, before the filing date {filing}")]
    StopClockBeforeFiling { start: Date, filing: Date },

    #[error("stop clock needs both a start date and a duration")]
    IncompleteStopClock,

    #[error("commitments need both a phase and a duration")]
    IncompleteCommitments,

    #[error("a stop clock or commitments extension needs a filing date")]
    MissingFilingDate,
}

/// Timeline parameters as entered, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineParameters {
    pub filing_date: Option<Date>,
    pub phase: PhaseOption,
    pub pre_assessment_days: Option<u32>,
    pub stop_clock_start: Option<Date>,
    pub stop_clock_days: Option<u32>,
    pub commitments_phase: Option<CommitmentsPhase>,
    pub commitments_days: Option<u32>,
}

impl TimelineParameters {
    /// Checks and clamps the parameters into composer inputs.
    ///
    /// A commitments duration outside 1–15 is clamped rather than rejected.
    pub fn validate(&self) -> Result<TimelineInputs, ParameterError> {
        let stop_clock = match (self.stop_clock_start, self.stop_clock_days) {
            (None, None) => None,
            (Some(start_date), Some(duration_business_days)) => Some(StopClock {
                start_date,
                duration_business_days,
            }),
            _ => return Err(ParameterError::IncompleteStopClock),
        };

        let commitments = match (self.commitments_phase, self.commitments_days) {
            (None, None) => None,
            (Some(phase), Some(days)) => Some(Commitments {
                phase,
                duration_business_days: clamp_commitments_days(days),
            }),
            _ => return Err(ParameterError::IncompleteCommitments),
        };

        let Some(filing) = self.filing_date else {
            if stop_clock.is_some() || commitments.is_some() {
                return Err(ParameterError::MissingFilingDate);
            }
            return Ok(TimelineInputs {
                phase: self.phase,
                ..TimelineInputs::default()
            });
        };

        if is_weekend(filing) {
            return Err(ParameterError::FilingOnWeekend(filing));
        }

        if let Some(stop) = stop_clock
            && stop.start_date < filing
        {
            return Err(ParameterError::StopClockBeforeFiling {
                start: stop.start_date,
                filing,
            });
        }

        Ok(TimelineInputs {
            filing_date: Some(filing),
            phase: self.phase,
            pre_assessment: self
                .pre_assessment_days
                .filter(|&d| d > 0)
                .map(|lead_business_days| PreAssessment { lead_business_days }),
            stop_clock,
            commitments,
        })
    }
}

fn clamp_commitments_days(days: u32) -> u32 {
    let clamped = days.clamp(MIN_COMMITMENTS_DAYS, MAX_COMMITMENTS_DAYS);
    if clamped != days {
        warn!(requested = days, clamped, "commitments days out of range");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    fn params() -> TimelineParameters {
        TimelineParameters {
            filing_date: Some(date(2026, 1, 5)),
            ..TimelineParameters::default()
        }
    }

    #[test]
    fn minimal_parameters() {
        let inputs = params().validate().unwrap();
        assert_eq!(inputs.filing_date, Some(date(2026, 1, 5)));
        assert_eq!(inputs.phase, PhaseOption::Phase1And2);
        assert!(inputs.pre_assessment.is_none());
        assert!(inputs.stop_clock.is_none());
        assert!(inputs.commitments.is_none());
    }

    #[test]
    fn missing_filing_date_yields_empty_inputs() {
        let inputs = TimelineParameters::default().validate().unwrap();
        assert_eq!(inputs.filing_date, None);
    }

    #[test]
    fn modifiers_without_filing_date_rejected() {
        let err = TimelineParameters {
            stop_clock_start: Some(date(2026, 1, 20)),
            stop_clock_days: Some(5),
            ..TimelineParameters::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ParameterError::MissingFilingDate);
    }

    #[test]
    fn weekend_filing_rejected() {
        let err = TimelineParameters {
            filing_date: Some(date(2026, 1, 3)),
            ..TimelineParameters::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ParameterError::FilingOnWeekend(date(2026, 1, 3)));
    }

    #[test]
    fn stop_clock_before_filing_rejected() {
        let err = TimelineParameters {
            stop_clock_start: Some(date(2026, 1, 2)),
            stop_clock_days: Some(5),
            ..params()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ParameterError::StopClockBeforeFiling { .. }));
    }

    #[test]
    fn stop_clock_on_filing_date_allowed() {
        let inputs = TimelineParameters {
            stop_clock_start: Some(date(2026, 1, 5)),
            stop_clock_days: Some(5),
            ..params()
        }
        .validate()
        .unwrap();
        assert_eq!(inputs.stop_clock.unwrap().start_date, date(2026, 1, 5));
    }

    #[test]
    fn half_stop_clock_rejected() {
        let err = TimelineParameters {
            stop_clock_days: Some(5),
            ..params()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ParameterError::IncompleteStopClock);
    }

    #[test]
    fn half_commitments_rejected() {
        let err = TimelineParameters {
            commitments_phase: Some(CommitmentsPhase::Phase1),
            ..params()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ParameterError::IncompleteCommitments);
    }

    #[test]
    fn commitments_days_clamped() {
        for (requested, expected) in [(0, 1), (1, 1), (10, 10), (15, 15), (40, 15)] {
            let inputs = TimelineParameters {
                commitments_phase: Some(CommitmentsPhase::Phase2),
                commitments_days: Some(requested),
                ..params()
            }
            .validate()
            .unwrap();
            assert_eq!(
                inputs.commitments.unwrap().duration_business_days,
                expected,
                "requested {requested}"
            );
        }
    }

    #[test]
    fn zero_pre_assessment_dropped() {
        let inputs = TimelineParameters {
            pre_assessment_days: Some(0),
            ..params()
        }
        .validate()
        .unwrap();
        assert!(inputs.pre_assessment.is_none());
    }

    #[test]
    fn pre_assessment_kept() {
        let inputs = TimelineParameters {
            pre_assessment_days: Some(7),
            ..params()
        }
        .validate()
        .unwrap();
        assert_eq!(inputs.pre_assessment.unwrap().lead_business_days, 7);
    }
}
