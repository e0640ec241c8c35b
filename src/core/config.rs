//! Configuration management
//!
//! Layers, lowest precedence first: built-in defaults, the user config in
//! the platform config directory, `.dse.yaml` in the working directory, then
//! environment variables.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::constraint::ConstraintTable;
use crate::entities::{Field, ParameterRecord};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".dse.yaml";

/// Environment variable overriding the Poisson's ratio bound
pub const NU_MAX_ENV: &str = "DSE_NU_MAX";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value '{value}' for {var}: expected a number")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Upper bound for nu must be a positive number (got {0})")]
    InvalidNuMax(f64),
}

/// Initial parameter values for new editing sessions
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub northing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(rename = "dVx", skip_serializing_if = "Option::is_none")]
    pub d_vx: Option<f64>,
    #[serde(rename = "dVy", skip_serializing_if = "Option::is_none")]
    pub d_vy: Option<f64>,
    #[serde(rename = "dVz", skip_serializing_if = "Option::is_none")]
    pub d_vz: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nu: Option<f64>,
}

impl SourceDefaults {
    fn values(&self) -> [(Field, Option<f64>); 10] {
        [
            (Field::Easting, self.easting),
            (Field::Northing, self.northing),
            (Field::Depth, self.depth),
            (Field::DVx, self.d_vx),
            (Field::DVy, self.d_vy),
            (Field::DVz, self.d_vz),
            (Field::RotationX, self.rotation_x),
            (Field::RotationY, self.rotation_y),
            (Field::RotationZ, self.rotation_z),
            (Field::Nu, self.nu),
        ]
    }

    /// Fields set by this layer
    pub fn overrides(&self) -> impl Iterator<Item = (Field, f64)> {
        self.values()
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
    }

    fn merge(&mut self, other: SourceDefaults) {
        let SourceDefaults {
            easting,
            northing,
            depth,
            d_vx,
            d_vy,
            d_vz,
            rotation_x,
            rotation_y,
            rotation_z,
            nu,
        } = other;
        self.easting = easting.or(self.easting);
        self.northing = northing.or(self.northing);
        self.depth = depth.or(self.depth);
        self.d_vx = d_vx.or(self.d_vx);
        self.d_vy = d_vy.or(self.d_vy);
        self.d_vz = d_vz.or(self.d_vz);
        self.rotation_x = rotation_x.or(self.rotation_x);
        self.rotation_y = rotation_y.or(self.rotation_y);
        self.rotation_z = rotation_z.or(self.rotation_z);
        self.nu = nu.or(self.nu);
    }
}

/// Constraint overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstraintConfig {
    /// Upper bound of Poisson's ratio (default 360)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nu_max: Option<f64>,
}

/// Format used when publishing committed records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitFormat {
    #[default]
    Yaml,
    Json,
    /// One human-readable line per commit
    Text,
}

impl std::fmt::Display for CommitFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitFormat::Yaml => write!(f, "yaml"),
            CommitFormat::Json => write!(f, "json"),
            CommitFormat::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<CommitFormat>,
}

/// Merged configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: SourceDefaults,
    pub constraints: ConstraintConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, ConfigError> {
        let local = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE));
        let mut config = Self::load_layers(Self::user_config_path().as_deref(), local.as_deref())?;
        config.apply_env(std::env::var(NU_MAX_ENV).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the user config file, if the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dse").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge the given files in order; missing files are skipped
    pub fn load_layers(user: Option<&Path>, local: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        for path in [user, local].into_iter().flatten() {
            if let Some(layer) = Self::load_file(path)? {
                config.merge(layer);
            }
        }
        Ok(config)
    }

    /// Read one config file; `Ok(None)` if it does not exist
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Some(Config::default()));
        }

        serde_yml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Merge another config (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        self.defaults.merge(other.defaults);
        if other.constraints.nu_max.is_some() {
            self.constraints.nu_max = other.constraints.nu_max;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
    }

    fn apply_env(&mut self, nu_max: Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = nu_max {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: NU_MAX_ENV,
                    value: raw.clone(),
                })?;
            self.constraints.nu_max = Some(value);
        }
        Ok(())
    }

    /// Reject settings the constraint table cannot represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.constraints.nu_max {
            Some(max) if !(max.is_finite() && max > 0.0) => Err(ConfigError::InvalidNuMax(max)),
            _ => Ok(()),
        }
    }

    /// Constraint table implied by this config
    pub fn constraint_table(&self) -> ConstraintTable {
        match self.constraints.nu_max {
            Some(max) => ConstraintTable::new().with_nu_max(max),
            None => ConstraintTable::new(),
        }
    }

    /// Record that new sessions start from
    ///
    /// Values are raw; the parameter model normalizes them on open.
    pub fn initial_record(&self) -> ParameterRecord {
        let constraints = self.constraint_table();
        self.defaults
            .overrides()
            .fold(ParameterRecord::default(), |record, (field, value)| {
                record.with(field, constraints.accept(field, value))
            })
    }

    /// Publishing format, YAML unless configured otherwise
    pub fn commit_format(&self) -> CommitFormat {
        self.output.format.unwrap_or_default()
    }
}
