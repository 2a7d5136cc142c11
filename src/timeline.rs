//! Timeline records and record selection
//!
//! A timeline is the tree of records describing the sub-steps of a job's
//! execution within a plan. Records are fetched fresh from the backend on
//! every progress/completion call and never cached locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::JobId;

/// Current state of a timeline record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    Pending,
    InProgress,
    Completed,
}

/// Result of a finished timeline record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordResult {
    Unset,
    Succeeded,
    Failed,
}

/// One node in a job's timeline tree, as the backend stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRecord {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub state: RecordState,
    pub percent_complete: u8,
    pub result: RecordResult,
    pub finish_time: Option<DateTime<Utc>>,
}

impl TimelineRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: None,
            state: RecordState::Pending,
            percent_complete: 0,
            result: RecordResult::Unset,
            finish_time: None,
        }
    }

    /// Mark the record as running.
    pub fn start(&mut self) {
        self.state = RecordState::InProgress;
    }

    /// Close the record with the given outcome.
    pub fn finish(&mut self, succeeded: bool, finish_time: DateTime<Utc>) {
        self.state = RecordState::Completed;
        self.percent_complete = 100;
        self.result = if succeeded {
            RecordResult::Succeeded
        } else {
            RecordResult::Failed
        };
        self.finish_time = Some(finish_time);
    }

    /// Clamp percent-complete into its valid 0..=100 range.
    pub fn set_percent_complete(&mut self, percent: u8) {
        self.percent_complete = percent.min(100);
    }
}

/// Which records of a timeline belong to this reporter's job.
///
/// The two addressing modes are mutually exclusive and fixed at construction
/// time: either the job's subtree root plus its immediate children, or every
/// record matching a configured name anywhere in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// Records whose id or parent id equals the job id.
    JobSubtree(JobId),
    /// Records whose name matches, case-insensitively, regardless of
    /// position in the tree.
    ByName(String),
}

impl RecordSelector {
    /// Build the selector for a job with an optional record-name filter.
    pub fn for_job(job_id: JobId, record_name: Option<String>) -> Self {
        match record_name {
            Some(name) => RecordSelector::ByName(name),
            None => RecordSelector::JobSubtree(job_id),
        }
    }

    pub fn matches(&self, record: &TimelineRecord) -> bool {
        match self {
            RecordSelector::JobSubtree(job_id) => {
                record.id == job_id.0
                    || record.parent_id.as_deref() == Some(job_id.0.as_str())
            }
            RecordSelector::ByName(name) => record
                .name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name)),
        }
    }

    /// Filter a fetched record set down to this job's records.
    pub fn select(&self, records: Vec<TimelineRecord>) -> Vec<TimelineRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
