// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Holemap Geometry
//!
//! Geometry used to resolve hole identity across machining jobs:
//!
//! - [`frame`]: home-frame to part-frame transforms and hole-center extraction
//! - [`point`]: fixed-precision rounding and hashable grid points
//! - [`shape`]: hole cross-sections and tolerance-based shape equality
//!
//! nalgebra types are re-exported for convenience.

pub mod frame;
pub mod point;
pub mod shape;

pub use nalgebra::{Matrix3, Point3, Vector3};

pub use frame::{extract_points, FrameTransform, PositionFormat};
pub use point::{round_point, round_to, GridPoint};
pub use shape::{match_orientation, same_shape, shapes_match, Orientation, Segment, SegmentKind, Shape};
