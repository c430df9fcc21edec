// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-job outcomes and per-part ingestion reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use holemap_topology::HoleGroupOutcome;

/// Why a job was not merged into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The job type is not one the catalog tracks.
    UnsupportedType(String),
    /// The job has no recognized hole groups (pocket pre-drilling and the
    /// like).
    NoHoleGroups,
    /// The job record itself is unusable.
    InvalidRecord(holemap_core::Error),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedType(tag) => write!(f, "unsupported job type {tag}"),
            SkipReason::NoHoleGroups => f.write_str("no recognized hole groups"),
            SkipReason::InvalidRecord(e) => write!(f, "{e}"),
        }
    }
}

/// A hole-group entry that could not be merged.
#[derive(Debug)]
pub struct EntryError {
    /// Index of the entry within the job's hole groups.
    pub entry: usize,
    pub error: holemap_topology::Error,
}

/// What ingesting one job did to the catalog.
#[derive(Debug, Default)]
pub struct ProcessedJob {
    /// One outcome per merged hole-group entry, in entry order.
    pub hole_groups: Vec<HoleGroupOutcome>,
    pub abandoned: Vec<EntryError>,
    /// Index of the entry whose invalid shape mask stopped the job.
    pub aborted_at: Option<usize>,
}

impl ProcessedJob {
    pub fn created_holes(&self) -> usize {
        self.hole_groups.iter().map(|o| o.created_holes).sum()
    }
}

/// Result of [`ingest_job`](crate::ingest_job).
#[derive(Debug)]
pub enum JobOutcome {
    Skipped(SkipReason),
    Processed(ProcessedJob),
}

impl JobOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, JobOutcome::Processed(_))
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            JobOutcome::Skipped(reason) => Some(reason),
            JobOutcome::Processed(_) => None,
        }
    }
}

/// A skipped job as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedJob {
    /// Position of the job in the part's job list.
    pub position: usize,
    pub name: String,
    pub reason: String,
}

/// An abandoned hole-group entry as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbandonedEntry {
    pub position: usize,
    pub name: String,
    pub entry: usize,
    pub error: String,
}

/// Summary of ingesting one part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub part_name: String,
    /// Job entries in the part, including skipped ones.
    pub jobs_seen: usize,
    pub processed_jobs: usize,
    pub skipped_jobs: Vec<SkippedJob>,
    /// Skipped jobs whose record was unusable.
    pub invalid_jobs: usize,
    pub abandoned_entries: Vec<AbandonedEntry>,
    pub created_topologies: usize,
    pub created_groups: usize,
    pub created_holes: usize,
    /// Jobs appended to holes that already existed.
    pub attached_jobs: usize,
    pub duplicate_jobs: usize,
    /// Through-hole observations merged into the hole seen from the
    /// opposite home.
    pub far_face_merges: usize,
    /// Total processing time (ms).
    pub total_time_ms: u64,
}

impl IngestReport {
    pub fn new(part_name: &str) -> Self {
        Self {
            part_name: part_name.to_string(),
            ..Default::default()
        }
    }

    /// Folds the outcome of the job at `position` into the report.
    pub fn record(&mut self, position: usize, name: &str, outcome: &JobOutcome) {
        self.jobs_seen += 1;
        match outcome {
            JobOutcome::Skipped(reason) => self.skip(position, name, reason),
            JobOutcome::Processed(job) => {
                self.processed_jobs += 1;
                for o in &job.hole_groups {
                    self.created_topologies += usize::from(o.created_topology);
                    self.created_groups += usize::from(o.created_group);
                    self.created_holes += o.created_holes;
                    self.attached_jobs += o.attached_jobs;
                    self.duplicate_jobs += o.duplicate_jobs;
                    self.far_face_merges += o.far_face_merges;
                }
                self.abandoned_entries
                    .extend(job.abandoned.iter().map(|e| AbandonedEntry {
                        position,
                        name: name.to_string(),
                        entry: e.entry,
                        error: e.error.to_string(),
                    }));
            }
        }
    }

    fn skip(&mut self, position: usize, name: &str, reason: &SkipReason) {
        if matches!(reason, SkipReason::InvalidRecord(_)) {
            self.invalid_jobs += 1;
        }
        self.skipped_jobs.push(SkippedJob {
            position,
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Returns `true` if no job or entry was dropped because of bad input.
    pub fn is_clean(&self) -> bool {
        self.invalid_jobs == 0 && self.abandoned_entries.is_empty()
    }
}
