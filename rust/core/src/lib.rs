// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Holemap Core
//!
//! Shared vocabulary for the hole catalog: the already-parsed job records
//! handed over by the ingestion layer, the machining-job domain types built
//! from them, the catalog configuration, and the error taxonomy for
//! malformed record fields.
//!
//! Nothing in this crate performs geometry. Frame transforms and shape
//! comparison live in `holemap-geometry`; the catalog itself lives in
//! `holemap-topology`.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod job;
pub mod records;

pub use config::CatalogConfig;
pub use dictionary::{Dictionary, ParamValue};
pub use error::{Error, Result};
pub use job::{DrillCycle, DrillParams, Job, JobParams, JobType, MultiAxisDepth, Tool};
pub use records::{
    DrillCycleRecord, DrillRecord, EventDataRecord, GeometryRecord, HoleGroupRecord, JobRecord,
    PartRecord, SegmentRecord, ToolRecord,
};
