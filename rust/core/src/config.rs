// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog configuration, optionally loaded from environment variables.

/// Default comparison tolerance in part units (mm).
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Default number of decimals transformed points are rounded to.
pub const DEFAULT_PRECISION: u32 = 3;

/// Numeric settings shared by every comparison the catalog makes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogConfig {
    /// Absolute tolerance for shape extents, diameters and through-hole
    /// distances.
    pub tolerance: f64,
    /// Decimals kept after transforming a point into the part frame.
    pub precision: u32,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// `HOLEMAP_TOLERANCE` and `HOLEMAP_PRECISION` override the defaults;
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            tolerance: lookup("HOLEMAP_TOLERANCE")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t >= 0.0)
                .unwrap_or(DEFAULT_TOLERANCE),
            precision: lookup("HOLEMAP_PRECISION")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|p| *p <= 9)
                .unwrap_or(DEFAULT_PRECISION),
        }
    }

    /// Returns a copy with a different tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns a copy with a different rounding precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            precision: DEFAULT_PRECISION,
        }
    }
}
