//! Derived volume of an ellipsoidal source

use std::f64::consts::PI;

use crate::entities::ParameterRecord;

/// Volume of a triaxial ellipsoid from its three semi-axis lengths (m^3)
pub fn ellipsoid_volume(a: i64, b: i64, c: i64) -> f64 {
    4.0 / 3.0 * PI * a as f64 * b as f64 * c as f64
}

/// Volume implied by the semi-axes of `record`
pub fn record_volume(record: &ParameterRecord) -> f64 {
    ellipsoid_volume(record.d_vx, record.d_vy, record.d_vz)
}
