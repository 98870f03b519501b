use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::algorithms::{strategy_from_name, CyclicPairResection, LineIntersector, ResectionStrategy};
use crate::api::types::OutputFormat;
use crate::core::DEFAULT_PARALLEL_TOLERANCE_DEG;

/// Log levels accepted in configuration files
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Run-wide triangulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationConfig {
    /// Inclination difference (degrees) below which two bearing lines are
    /// treated as parallel
    pub parallel_tolerance_deg: f64,
    /// Resection strategy name
    pub strategy: String,
    /// Report format written to stdout
    pub output_format: OutputFormat,
    /// Default log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Log a warning for fixes lying behind an observer
    pub flag_rays_behind_observer: bool,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            parallel_tolerance_deg: DEFAULT_PARALLEL_TOLERANCE_DEG,
            strategy: CyclicPairResection::NAME.to_string(),
            output_format: OutputFormat::Text,
            log_level: "warn".to_string(),
            flag_rays_behind_observer: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl TriangulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate configuration from a JSON file. Missing fields take
    /// their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: TriangulationConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.parallel_tolerance_deg.is_finite() || self.parallel_tolerance_deg <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "parallel_tolerance_deg".to_string(),
                value: self.parallel_tolerance_deg.to_string(),
                reason: "must be a positive number of degrees".to_string(),
            });
        }
        if self.parallel_tolerance_deg >= 90.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "parallel_tolerance_deg".to_string(),
                value: self.parallel_tolerance_deg.to_string(),
                reason: "must be below 90 degrees or every pair is parallel".to_string(),
            });
        }
        if strategy_from_name(&self.strategy).is_none() {
            return Err(ConfigError::InvalidParameter {
                parameter: "strategy".to_string(),
                value: self.strategy.clone(),
                reason: format!("known strategies: {}", CyclicPairResection::NAME),
            });
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidParameter {
                parameter: "log_level".to_string(),
                value: self.log_level.clone(),
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    pub fn with_parallel_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.parallel_tolerance_deg = tolerance_deg;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_strategy(mut self, name: impl Into<String>) -> Self {
        self.strategy = name.into();
        self
    }

    /// Intersector honouring the configured tolerance
    pub fn intersector(&self) -> LineIntersector {
        LineIntersector::new(self.parallel_tolerance_deg)
    }

    /// The configured strategy
    pub fn resection_strategy(&self) -> Result<Box<dyn ResectionStrategy>, ConfigError> {
        strategy_from_name(&self.strategy).ok_or_else(|| ConfigError::InvalidParameter {
            parameter: "strategy".to_string(),
            value: self.strategy.clone(),
            reason: "unknown resection strategy".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TriangulationConfig::default();
        assert_eq!(config.parallel_tolerance_deg, DEFAULT_PARALLEL_TOLERANCE_DEG);
        assert_eq!(config.strategy, "cyclic-pair");
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        let config = TriangulationConfig::new().with_parallel_tolerance(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "parallel_tolerance_deg"
        ));

        assert!(TriangulationConfig::new().with_parallel_tolerance(f64::NAN).validate().is_err());
        assert!(TriangulationConfig::new().with_parallel_tolerance(95.0).validate().is_err());
        assert!(TriangulationConfig::new().with_strategy("least-squares").validate().is_err());
        assert!(TriangulationConfig::new().with_log_level("chatty").validate().is_err());
        assert!(TriangulationConfig::new().with_log_level("DEBUG").validate().is_ok());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangulation.json");

        let config = TriangulationConfig::new()
            .with_parallel_tolerance(0.5)
            .with_output_format(OutputFormat::Json)
            .with_log_level("debug");
        config.save_to_file(&path).unwrap();

        let loaded = TriangulationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "output_format": "overlay" }"#).unwrap();

        let loaded = TriangulationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.output_format, OutputFormat::Overlay);
        assert_eq!(loaded.parallel_tolerance_deg, DEFAULT_PARALLEL_TOLERANCE_DEG);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            TriangulationConfig::load_from_file("/nonexistent/triangulation.json"),
            Err(ConfigError::IoError { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            TriangulationConfig::load_from_file(&path),
            Err(ConfigError::SerializationError { .. })
        ));

        fs::write(&path, r#"{ "parallel_tolerance_deg": -1.0 }"#).unwrap();
        assert!(matches!(
            TriangulationConfig::load_from_file(&path),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_intersector_and_strategy() {
        let config = TriangulationConfig::new().with_parallel_tolerance(0.25);
        assert!((config.intersector().parallel_tolerance_deg() - 0.25).abs() < 1e-12);
        assert_eq!(config.resection_strategy().unwrap().name(), "cyclic-pair");
    }
}
