// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole cross-sections and tolerance-based shape equality.
//!
//! A cross-section is an ordered list of straight or arc segments in the
//! (radial, axial) half-plane of the hole axis. A hole machined from the
//! opposite face is described end-to-start, so equality is tested both as-is
//! and reversed.

use serde::Serialize;

use holemap_core::{Error, Result, SegmentRecord};

/// Segment geometry type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentKind {
    Line,
    Arc,
    Other(String),
}

impl From<&str> for SegmentKind {
    fn from(tag: &str) -> Self {
        match tag {
            "line" => SegmentKind::Line,
            "arc" => SegmentKind::Arc,
            other => SegmentKind::Other(other.to_string()),
        }
    }
}

/// One cross-section segment. Endpoints are `[radial, axial]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub p0: [f64; 2],
    pub p1: [f64; 2],
}

impl Segment {
    pub fn new(kind: SegmentKind, p0: [f64; 2], p1: [f64; 2]) -> Self {
        Self { kind, p0, p1 }
    }

    #[inline]
    pub fn radial_extent(&self) -> f64 {
        (self.p0[0] - self.p1[0]).abs()
    }

    #[inline]
    pub fn axial_extent(&self) -> f64 {
        (self.p0[1] - self.p1[1]).abs()
    }

    /// The same segment traversed from `p1` to `p0`.
    pub fn flipped(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            p0: self.p1,
            p1: self.p0,
        }
    }
}

impl From<&SegmentRecord> for Segment {
    fn from(record: &SegmentRecord) -> Self {
        Segment::new(record.kind.as_str().into(), record.p0, record.p1)
    }
}

/// Direction in which a candidate cross-section is laid against an existing
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    Reversed,
}

/// An ordered hole cross-section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub segments: Vec<Segment>,
}

impl Shape {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Builds a shape from exported segments. An empty list is rejected.
    pub fn from_records(records: &[SegmentRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyShape);
        }
        Ok(Self::new(records.iter().map(Segment::from).collect()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The same cross-section described from the opposite face: segment
    /// order reversed and each segment flipped.
    pub fn reversed(&self) -> Self {
        Self::new(self.segments.iter().rev().map(Segment::flipped).collect())
    }

    /// Twice the smallest radial position of any segment start point.
    pub fn nominal_diameter(&self) -> f64 {
        let min_radius = self
            .segments
            .iter()
            .map(|s| s.p0[0])
            .fold(f64::INFINITY, f64::min);
        if min_radius.is_finite() {
            (2.0 * min_radius).abs()
        } else {
            0.0
        }
    }
}

/// Compares two segments at matching positions.
fn segments_match(candidate: &Segment, existing: &Segment, orientation: Orientation, tolerance: f64) -> bool {
    if candidate.kind != existing.kind {
        return false;
    }

    if (candidate.axial_extent() - existing.axial_extent()).abs() > tolerance {
        return false;
    }

    // Radial positions are compared as diameters. A reversed candidate runs
    // end-to-start, so both of its endpoints are checked against the
    // opposite ends of the existing segment.
    let diameters_close = |a: f64, b: f64| (2.0 * a - 2.0 * b).abs() <= tolerance;
    let endpoints_match = match orientation {
        Orientation::Forward => diameters_close(candidate.p0[0], existing.p0[0]),
        Orientation::Reversed => {
            diameters_close(candidate.p0[0], existing.p1[0])
                && diameters_close(candidate.p1[0], existing.p0[0])
        }
    };
    if !endpoints_match {
        return false;
    }

    (candidate.radial_extent() - existing.radial_extent()).abs() <= tolerance
}

/// Tests `candidate` against `existing` in one orientation.
///
/// With [`Orientation::Reversed`] the candidate's segments are walked
/// end-to-start and each one is compared with the far endpoint of its
/// counterpart.
pub fn shapes_match(candidate: &Shape, existing: &Shape, orientation: Orientation, tolerance: f64) -> bool {
    if candidate.len() != existing.len() {
        return false;
    }

    let pairs = existing.segments.iter();
    match orientation {
        Orientation::Forward => candidate
            .segments
            .iter()
            .zip(pairs)
            .all(|(c, e)| segments_match(c, e, orientation, tolerance)),
        Orientation::Reversed => candidate
            .segments
            .iter()
            .rev()
            .zip(pairs)
            .all(|(c, e)| segments_match(c, e, orientation, tolerance)),
    }
}

/// Returns the orientation in which `candidate` matches `existing`, trying
/// forward first.
pub fn match_orientation(candidate: &Shape, existing: &Shape, tolerance: f64) -> Option<Orientation> {
    [Orientation::Forward, Orientation::Reversed]
        .into_iter()
        .find(|&o| shapes_match(candidate, existing, o, tolerance))
}

/// Returns `true` if the two cross-sections describe the same hole shape,
/// directly or reversed.
pub fn same_shape(candidate: &Shape, existing: &Shape, tolerance: f64) -> bool {
    match_orientation(candidate, existing, tolerance).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.1;

    fn line(p0: [f64; 2], p1: [f64; 2]) -> Segment {
        Segment::new(SegmentKind::Line, p0, p1)
    }

    /// Counterbore: wide shallow bore, shoulder, narrow through bore.
    fn counterbore() -> Shape {
        Shape::new(vec![
            line([5.5, 0.0], [5.5, -6.0]),
            line([5.5, -6.0], [3.3, -6.0]),
            line([3.3, -6.0], [3.3, -20.0]),
        ])
    }

    #[test]
    fn identical_shapes_match_forward() {
        let s = counterbore();
        assert_eq!(match_orientation(&s, &s, TOL), Some(Orientation::Forward));
    }

    #[test]
    fn length_mismatch_never_matches() {
        let s = counterbore();
        let mut shorter = s.clone();
        shorter.segments.pop();
        assert!(!same_shape(&s, &shorter, TOL));
        assert!(!same_shape(&shorter, &s, TOL));
    }

    #[test]
    fn mirrored_description_matches_reversed() {
        let s = counterbore();
        let mirrored = s.reversed();
        assert!(!shapes_match(&mirrored, &s, Orientation::Forward, TOL));
        assert_eq!(match_orientation(&mirrored, &s, TOL), Some(Orientation::Reversed));
    }

    #[test]
    fn reversal_of_symmetric_shape_matches() {
        let s = Shape::new(vec![
            line([4.0, 0.0], [4.0, -10.0]),
            Segment::new(SegmentKind::Arc, [4.0, -10.0], [4.0, -12.0]),
            line([4.0, -12.0], [4.0, -22.0]),
        ]);
        assert!(same_shape(&s.reversed(), &s, TOL));
        assert!(same_shape(&s, &s.reversed(), TOL));
    }

    #[test]
    fn forward_match_is_symmetric_under_operand_swap() {
        let a = counterbore();
        let mut b = counterbore();
        b.segments[2].p1[1] = -20.05;
        assert!(shapes_match(&a, &b, Orientation::Forward, TOL));
        assert!(shapes_match(&b, &a, Orientation::Forward, TOL));

        b.segments[2].p1[1] = -21.0;
        assert!(!shapes_match(&a, &b, Orientation::Forward, TOL));
        assert!(!shapes_match(&b, &a, Orientation::Forward, TOL));
    }

    #[test]
    fn reversed_match_is_symmetric_under_operand_swap() {
        // Same extents everywhere, but the radial endpoints only line up
        // one way round.
        let a = Shape::new(vec![line([1.0, 0.0], [1.0, -1.0]), line([1.0, -1.0], [2.0, -2.0])]);
        let b = Shape::new(vec![line([0.0, 0.0], [1.0, -1.0]), line([1.0, -1.0], [1.0, -2.0])]);

        assert_eq!(
            shapes_match(&a, &b, Orientation::Reversed, TOL),
            shapes_match(&b, &a, Orientation::Reversed, TOL)
        );
        assert!(!shapes_match(&a, &b, Orientation::Reversed, TOL));
        assert_eq!(same_shape(&a, &b, TOL), same_shape(&b, &a, TOL));

        let s = counterbore();
        assert!(shapes_match(&s.reversed(), &s, Orientation::Reversed, TOL));
        assert!(shapes_match(&s, &s.reversed(), Orientation::Reversed, TOL));
    }

    #[test]
    fn noise_below_tolerance_is_absorbed() {
        let a = counterbore();
        let b = Shape::new(vec![
            line([5.52, 0.0], [5.52, -6.04]),
            line([5.52, -6.04], [3.31, -6.04]),
            line([3.31, -6.04], [3.31, -20.03]),
        ]);
        assert!(same_shape(&b, &a, TOL));
    }

    #[test]
    fn different_diameter_is_a_different_shape() {
        let a = counterbore();
        let mut b = counterbore();
        for seg in &mut b.segments {
            seg.p0[0] += 0.25;
            seg.p1[0] += 0.25;
        }
        assert!(!same_shape(&b, &a, TOL));
    }

    #[test]
    fn segment_type_must_match() {
        let a = counterbore();
        let mut b = counterbore();
        b.segments[1].kind = SegmentKind::Arc;
        assert!(!same_shape(&b, &a, TOL));
    }

    #[test]
    fn tolerance_is_caller_supplied() {
        let a = counterbore();
        let mut b = counterbore();
        b.segments[0].p1[1] = -6.105;
        b.segments[1].p0[1] = -6.105;
        b.segments[1].p1[1] = -6.105;
        b.segments[2].p0[1] = -6.105;
        assert!(!same_shape(&b, &a, 0.1));
        assert!(same_shape(&b, &a, 0.111));
    }

    #[test]
    fn nominal_diameter_uses_smallest_start_radius() {
        assert_eq!(counterbore().nominal_diameter(), 6.6);
        assert_eq!(Shape::new(Vec::new()).nominal_diameter(), 0.0);
    }

    #[test]
    fn records_convert_to_segments() {
        let records = vec![SegmentRecord {
            kind: "arc".to_string(),
            p0: [1.0, 0.0],
            p1: [2.0, -1.0],
        }];
        let shape = Shape::from_records(&records).unwrap();
        assert_eq!(shape.segments[0].kind, SegmentKind::Arc);
        assert_eq!(Shape::from_records(&[]), Err(Error::EmptyShape));
    }
}
