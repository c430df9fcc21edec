// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ingestion pipeline for hole cataloging.
//!
//! Takes the parsed job records of one part and merges them, in program
//! order, into a caller-owned [`Catalog`](holemap_topology::Catalog):
//!
//! ```text
//! JobRecord ─▶ FrameTransform ─▶ extract_points ─▶ Catalog::add_hole_group
//! ```
//!
//! Malformed input never aborts a part. Bad jobs are skipped, bad hole-group
//! entries abandoned, and both are listed in the returned [`IngestReport`].
//! Progress is logged through `tracing`; installing a subscriber is up to
//! the caller.

pub mod ingest;
pub mod report;

pub use ingest::{ingest_job, ingest_part, ingest_part_record};
pub use report::{
    AbandonedEntry, EntryError, IngestReport, JobOutcome, ProcessedJob, SkipReason, SkippedJob,
};
