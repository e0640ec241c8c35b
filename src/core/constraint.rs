//! Per-field numeric domains
//!
//! Every editable field has a [`FieldConstraint`] describing its domain,
//! spin step and wrap policy. Values that leave the domain re-enter from the
//! opposite bound instead of being clamped or rejected.

use serde::Serialize;

use crate::entities::Field;

/// Lower/upper bound of easting and northing (m)
pub const HORIZONTAL_LIMIT: f64 = 10_000_000.0;

/// Upper bound of depth and the semi-axis lengths (m)
pub const LENGTH_LIMIT: f64 = 10_000_000.0;

/// Default upper bound of Poisson's ratio
///
/// Kept at 360 to match the established form contract, even though the
/// physical range is [0, 0.5]. Override through configuration.
pub const DEFAULT_NU_MAX: f64 = 360.0;

/// Numeric domain of a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldConstraint {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub integral: bool,
    pub wraps: bool,
    /// `max` and `min` name the same point (angles)
    pub seamless: bool,
}

impl FieldConstraint {
    /// Whole-number domain that wraps
    pub const fn integral(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            integral: true,
            wraps: true,
            seamless: false,
        }
    }

    /// Floating-point domain that wraps
    pub const fn floating(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            integral: false,
            wraps: true,
            seamless: false,
        }
    }

    /// Floating-point circle where `max` coincides with `min`
    pub const fn circle(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            integral: false,
            wraps: true,
            seamless: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Period of the cyclic domain
    ///
    /// One step separates `max` from `min`, so stepping off `max` lands
    /// exactly on `min`. Seamless circles have no such gap.
    pub fn width(&self) -> f64 {
        if self.seamless {
            self.max - self.min
        } else {
            self.max - self.min + self.step
        }
    }

    /// Resolve `current + delta` into the domain
    ///
    /// Used for spin increments (`delta = n * step`) and for typed entry
    /// (`current` is the typed value, `delta = 0`). In-range results are
    /// returned untouched; everything else wraps. Non-finite input maps to a
    /// bound: NaN and -inf to `min`, +inf to `max`.
    pub fn normalize(&self, current: f64, delta: f64) -> f64 {
        let raw = current + delta;
        if raw.is_nan() {
            return self.min;
        }
        if raw.is_infinite() {
            return if raw > 0.0 { self.max } else { self.min };
        }

        let raw = if self.integral { raw.round() } else { raw };
        if self.contains(raw) {
            return raw;
        }
        if !self.wraps {
            return raw.clamp(self.min, self.max);
        }
        self.wrap(raw, delta)
    }

    /// Typed entry; shorthand for `normalize(value, 0.0)`
    pub fn accept(&self, value: f64) -> f64 {
        self.normalize(value, 0.0)
    }

    fn wrap(&self, raw: f64, delta: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return self.min;
        }

        let offset = (raw - self.min).rem_euclid(self.width());
        if offset <= span {
            return self.min + offset;
        }

        // Landed in the step-wide gap between max and the wrapped min:
        // snap to the nearer bound, ties follow the direction of travel.
        let past_max = offset - span;
        let half = self.step / 2.0;
        if past_max < half || (past_max == half && delta < 0.0) {
            self.max
        } else {
            self.min
        }
    }
}

/// Constraint lookup for every editable field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintTable {
    nu_max: f64,
}

impl ConstraintTable {
    pub fn new() -> Self {
        Self {
            nu_max: DEFAULT_NU_MAX,
        }
    }

    /// Replace the upper bound of Poisson's ratio
    pub fn with_nu_max(mut self, nu_max: f64) -> Self {
        self.nu_max = nu_max;
        self
    }

    pub fn nu_max(&self) -> f64 {
        self.nu_max
    }

    /// Normalize a typed `value` for `field`; `volume` passes through
    pub fn accept(&self, field: Field, value: f64) -> f64 {
        match self.get(field) {
            Some(constraint) => constraint.accept(value),
            None => value,
        }
    }

    /// Constraint for `field`, or `None` for the derived volume
    pub fn get(&self, field: Field) -> Option<FieldConstraint> {
        let constraint = match field {
            Field::Easting | Field::Northing => {
                FieldConstraint::integral(-HORIZONTAL_LIMIT, HORIZONTAL_LIMIT, 100.0)
            }
            Field::Depth => FieldConstraint::integral(0.0, LENGTH_LIMIT, 100.0),
            Field::DVx | Field::DVy | Field::DVz => {
                FieldConstraint::integral(0.0, LENGTH_LIMIT, 25.0)
            }
            Field::RotationX | Field::RotationY | Field::RotationZ => {
                FieldConstraint::circle(0.0, 360.0, 1.0)
            }
            Field::Nu => FieldConstraint::floating(0.0, self.nu_max, 0.1),
            Field::Volume => return None,
        };
        Some(constraint)
    }
}

impl Default for ConstraintTable {
    fn default() -> Self {
        Self::new()
    }
}
