//! Ellipsoidal point source entity
//!
//! One [`ParameterRecord`] holds the parameters of a single ellipsoidal
//! deformation source. Field names and units are the interop contract with
//! the owning modeling application and must not change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named parameter of an ellipsoidal source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "easting")]
    Easting,
    #[serde(rename = "northing")]
    Northing,
    #[serde(rename = "depth")]
    Depth,
    #[serde(rename = "dVx")]
    DVx,
    #[serde(rename = "dVy")]
    DVy,
    #[serde(rename = "dVz")]
    DVz,
    #[serde(rename = "rotation_x")]
    RotationX,
    #[serde(rename = "rotation_y")]
    RotationY,
    #[serde(rename = "rotation_z")]
    RotationZ,
    #[serde(rename = "nu")]
    Nu,
    #[serde(rename = "volume")]
    Volume,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 11] = [
        Field::Easting,
        Field::Northing,
        Field::Depth,
        Field::DVx,
        Field::DVy,
        Field::DVz,
        Field::RotationX,
        Field::RotationY,
        Field::RotationZ,
        Field::Nu,
        Field::Volume,
    ];

    /// Fields the user may edit (everything except the derived volume)
    pub const EDITABLE: [Field; 10] = [
        Field::Easting,
        Field::Northing,
        Field::Depth,
        Field::DVx,
        Field::DVy,
        Field::DVz,
        Field::RotationX,
        Field::RotationY,
        Field::RotationZ,
        Field::Nu,
    ];

    /// Contract name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Easting => "easting",
            Field::Northing => "northing",
            Field::Depth => "depth",
            Field::DVx => "dVx",
            Field::DVy => "dVy",
            Field::DVz => "dVz",
            Field::RotationX => "rotation_x",
            Field::RotationY => "rotation_y",
            Field::RotationZ => "rotation_z",
            Field::Nu => "nu",
            Field::Volume => "volume",
        }
    }

    /// Human-readable label for forms
    pub fn label(&self) -> &'static str {
        match self {
            Field::Easting => "Easting",
            Field::Northing => "Northing",
            Field::Depth => "Depth",
            Field::DVx => "Length X",
            Field::DVy => "Length Y",
            Field::DVz => "Length Z",
            Field::RotationX => "Rotation X",
            Field::RotationY => "Rotation Y",
            Field::RotationZ => "Rotation Z",
            Field::Nu => "Poisson's ratio",
            Field::Volume => "Volume",
        }
    }

    /// Physical unit of the field
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Easting | Field::Northing | Field::Depth => "m",
            Field::DVx | Field::DVy | Field::DVz => "m",
            Field::RotationX | Field::RotationY | Field::RotationZ => "deg",
            Field::Nu => "",
            Field::Volume => "m^3",
        }
    }

    /// Whether the field stores whole meters
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Field::Easting
                | Field::Northing
                | Field::Depth
                | Field::DVx
                | Field::DVy
                | Field::DVz
        )
    }

    /// Whether the field is computed rather than edited
    pub fn is_derived(&self) -> bool {
        matches!(self, Field::Volume)
    }

    /// Whether the field is one of the three semi-axis lengths
    pub fn is_axis(&self) -> bool {
        matches!(self, Field::DVx | Field::DVy | Field::DVz)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a field name is not part of the schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}' (expected one of: easting, northing, depth, dVx, dVy, dVz, rotation_x, rotation_y, rotation_z, nu, volume)")]
pub struct ParseFieldError(pub String);

impl std::str::FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        // Contract names first, then a case-insensitive fallback for typed input
        Field::ALL
            .iter()
            .find(|f| f.as_str() == name)
            .or_else(|| Field::ALL.iter().find(|f| f.as_str().eq_ignore_ascii_case(name)))
            .copied()
            .ok_or_else(|| ParseFieldError(name.to_string()))
    }
}

/// Typed value of a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl FieldValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Int(v) => *v as f64,
            FieldValue::Float(v) => *v,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Parameters of one ellipsoidal point source
///
/// Lengths are whole meters, rotations are degrees. `dVx`, `dVy` and `dVz`
/// are semi-axis lengths in the source's local frame before rotation.
/// `volume` is derived from the three semi-axes and is kept in sync by
/// [`crate::core::ParameterModel`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub easting: i64,
    pub northing: i64,
    pub depth: i64,

    #[serde(rename = "dVx")]
    pub d_vx: i64,
    #[serde(rename = "dVy")]
    pub d_vy: i64,
    #[serde(rename = "dVz")]
    pub d_vz: i64,

    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,

    /// Poisson's ratio
    pub nu: f64,

    /// Derived volume in cubic meters
    #[serde(default)]
    pub volume: f64,
}

impl ParameterRecord {
    /// Read a field as a typed value
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Easting => FieldValue::Int(self.easting),
            Field::Northing => FieldValue::Int(self.northing),
            Field::Depth => FieldValue::Int(self.depth),
            Field::DVx => FieldValue::Int(self.d_vx),
            Field::DVy => FieldValue::Int(self.d_vy),
            Field::DVz => FieldValue::Int(self.d_vz),
            Field::RotationX => FieldValue::Float(self.rotation_x),
            Field::RotationY => FieldValue::Float(self.rotation_y),
            Field::RotationZ => FieldValue::Float(self.rotation_z),
            Field::Nu => FieldValue::Float(self.nu),
            Field::Volume => FieldValue::Float(self.volume),
        }
    }

    /// Write a field without any domain handling
    ///
    /// Integral fields take the value rounded to whole meters. Writes to
    /// `volume` are ignored; it is only ever computed.
    pub fn set(&mut self, field: Field, value: f64) {
        let whole = value.round() as i64;
        match field {
            Field::Easting => self.easting = whole,
            Field::Northing => self.northing = whole,
            Field::Depth => self.depth = whole,
            Field::DVx => self.d_vx = whole,
            Field::DVy => self.d_vy = whole,
            Field::DVz => self.d_vz = whole,
            Field::RotationX => self.rotation_x = value,
            Field::RotationY => self.rotation_y = value,
            Field::RotationZ => self.rotation_z = value,
            Field::Nu => self.nu = value,
            Field::Volume => {}
        }
    }

    /// Builder-style variant of [`ParameterRecord::set`]
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }
}

impl std::fmt::Display for ParameterRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = Field::ALL
            .iter()
            .map(|field| format!("{}={}", field, self.get(*field)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
