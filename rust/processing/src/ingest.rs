// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Job ingestion: feeding a part's jobs, in program order, into a catalog.
//!
//! Order matters. Whether a point is the far face of an existing through
//! hole depends on the parallel homes recorded by earlier jobs, so jobs are
//! merged strictly one after another.

use std::borrow::Borrow;

use serde_json::Value;

use holemap_core::{Error as RecordError, HoleGroupRecord, Job, JobRecord, JobType, PartRecord};
use holemap_geometry::{extract_points, FrameTransform};
use holemap_topology::{Catalog, HoleGroupOutcome};

use crate::report::{EntryError, IngestReport, JobOutcome, ProcessedJob, SkipReason};

/// Merges one job into the catalog.
///
/// `position` is the job's index in the part and numbers the job when the
/// record carries no job number of its own.
///
/// Jobs of untracked types and jobs without recognized hole groups are
/// skipped. A malformed hole-group entry is abandoned and its siblings are
/// still merged, except for an invalid shape mask, which stops the
/// remaining entries of the job.
pub fn ingest_job(
    catalog: &mut Catalog,
    record: &JobRecord,
    part_name: &str,
    position: usize,
) -> JobOutcome {
    let Some(job_type) = JobType::from_tag(&record.job_type) else {
        tracing::debug!(job = %record.name, job_type = %record.job_type, "Skipping job of untracked type");
        return JobOutcome::Skipped(SkipReason::UnsupportedType(record.job_type.clone()));
    };

    let Some(entries) = record.hole_groups() else {
        tracing::debug!(job = %record.name, "Skipping job without recognized hole groups");
        return JobOutcome::Skipped(SkipReason::NoHoleGroups);
    };

    let frame = match record.home_matrix_values() {
        Ok(m) => FrameTransform::from_home_matrix(&m),
        Err(error) => {
            tracing::warn!(job = %record.name, error = %error, "Skipping job with unusable home matrix");
            return JobOutcome::Skipped(SkipReason::InvalidRecord(error));
        }
    };

    let number = record
        .job_number
        .unwrap_or_else(|| u32::try_from(position + 1).unwrap_or(u32::MAX));

    let mut processed = ProcessedJob::default();
    for (index, raw) in entries.iter().enumerate() {
        let entry = HoleGroupRecord::from_value(raw);
        let merged = entry
            .as_ref()
            .map_err(|e| holemap_topology::Error::from(e.clone()))
            .and_then(|entry| merge_entry(catalog, record, job_type, number, &frame, entry, part_name));

        match merged {
            Ok(outcome) => {
                log_outcome(&record.name, index, &outcome);
                processed.hole_groups.push(outcome);
            }
            Err(error) => {
                let aborts = match &entry {
                    Ok(entry) => matches!(entry.mask(), Err(RecordError::InvalidShapeMask(_))),
                    Err(_) => HoleGroupRecord::raw_mask(raw).is_some_and(|m| m <= 0),
                };
                tracing::warn!(
                    job = %record.name,
                    entry = index,
                    error = %error,
                    aborts_job = aborts,
                    "Abandoning hole-group entry"
                );
                processed.abandoned.push(EntryError { entry: index, error });
                if aborts {
                    processed.aborted_at = Some(index);
                    break;
                }
            }
        }
    }

    JobOutcome::Processed(processed)
}

fn merge_entry(
    catalog: &mut Catalog,
    record: &JobRecord,
    job_type: JobType,
    number: u32,
    frame: &FrameTransform,
    entry: &HoleGroupRecord,
    part_name: &str,
) -> holemap_topology::Result<HoleGroupOutcome> {
    // A bad mask is reported ahead of any position problem.
    entry.mask()?;
    let points = extract_points(entry, frame, catalog.config().precision)?;
    let job = Job::from_record(record, job_type, entry, number);
    catalog.add_hole_group(&job, &points, entry, part_name)
}

fn log_outcome(job: &str, entry: usize, outcome: &HoleGroupOutcome) {
    if outcome.created_topology {
        tracing::debug!(job = %job, entry, "Created topology");
    }
    if outcome.created_group {
        tracing::debug!(job = %job, entry, holes = outcome.created_holes, "Created hole group");
    }
    tracing::trace!(
        job = %job,
        entry,
        created_holes = outcome.created_holes,
        attached_jobs = outcome.attached_jobs,
        duplicate_jobs = outcome.duplicate_jobs,
        far_face_merges = outcome.far_face_merges,
        "Merged hole-group entry"
    );
}

/// A job entry of a part file that does not deserialize.
struct RejectedRecord {
    name: String,
    error: RecordError,
}

/// Ingests every job of a part, in order.
pub fn ingest_part(catalog: &mut Catalog, part_name: &str, records: &[JobRecord]) -> IngestReport {
    ingest_records(catalog, part_name, records.iter().map(Ok))
}

/// Ingests a part file. Job entries that do not deserialize are skipped and
/// reported; the remaining jobs are still merged.
pub fn ingest_part_record(catalog: &mut Catalog, part_name: &str, part: &PartRecord) -> IngestReport {
    ingest_records(
        catalog,
        part_name,
        part.event_data.jobs.iter().map(|value| {
            JobRecord::from_value(value).map_err(|error| RejectedRecord {
                name: value
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                error,
            })
        }),
    )
}

fn ingest_records<R, I>(catalog: &mut Catalog, part_name: &str, records: I) -> IngestReport
where
    R: Borrow<JobRecord>,
    I: IntoIterator<Item = Result<R, RejectedRecord>>,
{
    let start = std::time::Instant::now();
    tracing::info!(part = %part_name, "Starting part ingestion");

    let mut report = IngestReport::new(part_name);
    for (position, record) in records.into_iter().enumerate() {
        match record {
            Ok(record) => {
                let record: &JobRecord = record.borrow();
                let outcome = ingest_job(catalog, record, part_name, position);
                report.record(position, &record.name, &outcome);
            }
            Err(RejectedRecord { name, error }) => {
                tracing::warn!(part = %part_name, position, job = %name, error = %error, "Skipping malformed job record");
                let outcome = JobOutcome::Skipped(SkipReason::InvalidRecord(error));
                report.record(position, &name, &outcome);
            }
        }
    }

    report.total_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        part = %part_name,
        jobs = report.jobs_seen,
        processed = report.processed_jobs,
        skipped = report.skipped_jobs.len(),
        abandoned = report.abandoned_entries.len(),
        topologies = catalog.topology_count(),
        hole_groups = catalog.hole_group_count(),
        holes = catalog.hole_count(),
        total_time_ms = report.total_time_ms,
        "Part ingestion complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> JobRecord {
        serde_json::from_value(value).unwrap()
    }

    fn drill(job_type: &str) -> serde_json::Value {
        json!({
            "name": "Drill",
            "type": job_type,
            "home_matrix": [1.0, 0.0, 0.0, 0.0,
                            0.0, 1.0, 0.0, 0.0,
                            0.0, 0.0, 1.0, 0.0,
                            0.0, 0.0, 0.0, 1.0],
            "home_number": 1,
            "tool": { "tool_type": "TT_DRILL" },
            "job_depth": 10.0,
            "geometry": {
                "recognized_holes_groups": [{
                    "_topology_type": "HR_hwSimpleHole",
                    "_geomShapeMask": 2,
                    "_geom_ShapePoly": [{ "type": "line", "p0": [4.0, 0.0], "p1": [4.0, -10.0] }],
                    "_positions_format": "VFrmt_XY",
                    "_tech_positions": [0.0, 0.0, 20.0, 0.0],
                    "_geom_upper_level": 0.0,
                    "_geom_depth": 10.0
                }]
            }
        })
    }

    #[test]
    fn untracked_type_is_skipped() {
        let mut catalog = Catalog::default();
        let outcome = ingest_job(&mut catalog, &record(drill("NC_POCKET")), "part", 0);
        assert_eq!(
            outcome.skip_reason(),
            Some(&SkipReason::UnsupportedType("NC_POCKET".to_string()))
        );
        assert_eq!(catalog.topology_count(), 0);
    }

    #[test]
    fn pre_drilling_is_skipped() {
        let mut value = drill("NC_DRILL_OLD");
        value["geometry"] = json!({});
        let mut catalog = Catalog::default();
        let outcome = ingest_job(&mut catalog, &record(value), "part", 0);
        assert_eq!(outcome.skip_reason(), Some(&SkipReason::NoHoleGroups));
    }

    #[test]
    fn short_home_matrix_is_skipped() {
        let mut value = drill("NC_DRILL_OLD");
        value["home_matrix"] = json!([1.0, 0.0, 0.0]);
        let mut catalog = Catalog::default();
        let outcome = ingest_job(&mut catalog, &record(value), "part", 0);
        assert_eq!(
            outcome.skip_reason(),
            Some(&SkipReason::InvalidRecord(RecordError::InvalidHomeMatrix(3)))
        );
    }

    #[test]
    fn drilling_job_creates_holes() {
        let mut catalog = Catalog::default();
        let outcome = ingest_job(&mut catalog, &record(drill("NC_DRILL_DEEP")), "part", 6);

        let JobOutcome::Processed(job) = outcome else {
            panic!("job should be processed");
        };
        assert_eq!(job.hole_groups.len(), 1);
        assert_eq!(job.created_holes(), 2);
        assert!(job.abandoned.is_empty());

        let hole = catalog.hole_group(job.hole_groups[0].group).unwrap().holes()[0];
        let stored = &catalog.jobs_of(hole).unwrap()[0];
        assert_eq!(stored.job_type, JobType::MultiDepthDrilling);
        // Falls back to the 1-based position.
        assert_eq!(stored.number, 7);
    }

    #[test]
    fn malformed_entry_spares_siblings() {
        let mut value = drill("NC_DRILL_OLD");
        let good = value["geometry"]["recognized_holes_groups"][0].clone();
        let mut bad = good.clone();
        bad["_positions_format"] = json!("VFrmt_Polar");
        value["geometry"]["recognized_holes_groups"] = json!([bad, good]);

        let mut catalog = Catalog::default();
        let JobOutcome::Processed(job) = ingest_job(&mut catalog, &record(value), "part", 0) else {
            panic!("job should be processed");
        };

        assert_eq!(job.abandoned.len(), 1);
        assert_eq!(job.abandoned[0].entry, 0);
        assert_eq!(job.aborted_at, None);
        assert_eq!(job.hole_groups.len(), 1);
        assert_eq!(catalog.hole_count(), 2);
    }

    #[test]
    fn null_field_abandons_only_its_entry() {
        let mut value = drill("NC_DRILL_OLD");
        let good = value["geometry"]["recognized_holes_groups"][0].clone();
        let mut bad = good.clone();
        bad["_tech_positions"] = json!(null);
        value["geometry"]["recognized_holes_groups"] = json!([good, bad]);

        let mut catalog = Catalog::default();
        let JobOutcome::Processed(job) = ingest_job(&mut catalog, &record(value), "part", 0) else {
            panic!("job should be processed");
        };

        assert_eq!(job.hole_groups.len(), 1);
        assert_eq!(job.abandoned.len(), 1);
        assert_eq!(job.abandoned[0].entry, 1);
        assert!(matches!(
            job.abandoned[0].error.as_record(),
            Some(RecordError::InvalidRecord(_))
        ));
        assert_eq!(job.aborted_at, None);
        assert_eq!(catalog.hole_count(), 2);
    }

    #[test]
    fn unreadable_entry_with_bad_mask_stops_the_job() {
        let mut value = drill("NC_DRILL_OLD");
        let good = value["geometry"]["recognized_holes_groups"][0].clone();
        let mut bad = good.clone();
        bad["_geomShapeMask"] = json!(-21);
        bad["_geom_ShapePoly"] = json!(null);
        value["geometry"]["recognized_holes_groups"] = json!([bad, good]);

        let mut catalog = Catalog::default();
        let JobOutcome::Processed(job) = ingest_job(&mut catalog, &record(value), "part", 0) else {
            panic!("job should be processed");
        };

        assert_eq!(job.aborted_at, Some(0));
        assert_eq!(catalog.hole_count(), 0);
    }

    #[test]
    fn invalid_mask_stops_the_job() {
        let mut value = drill("NC_DRILL_OLD");
        let good = value["geometry"]["recognized_holes_groups"][0].clone();
        let mut bad = good.clone();
        bad["_geomShapeMask"] = json!(0);
        value["geometry"]["recognized_holes_groups"] = json!([bad, good]);

        let mut catalog = Catalog::default();
        let JobOutcome::Processed(job) = ingest_job(&mut catalog, &record(value), "part", 0) else {
            panic!("job should be processed");
        };

        assert_eq!(job.aborted_at, Some(0));
        assert!(job.hole_groups.is_empty());
        assert_eq!(
            job.abandoned[0].error.as_record(),
            Some(&RecordError::InvalidShapeMask(0))
        );
        assert_eq!(catalog.hole_count(), 0);
    }
}
