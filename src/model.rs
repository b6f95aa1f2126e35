//! Core data model.
//!
//! Timeline types describe one computation: the validated inputs and the
//! events produced from them. Merger types describe stored merger records
//! and their status history.

mod merger;
mod timeline;

pub use merger::{Merger, MergerStatus, StatusChange};
pub use timeline::{
    Commitments, CommitmentsPhase, EventFlags, PreAssessment, StopClock, Timeline, TimelineEvent,
    TimelineInputs,
};
