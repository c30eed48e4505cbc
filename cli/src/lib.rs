use lineart::LineartConfig;
use playback::PlaybackConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "capture")]
pub mod capture;

#[derive(Error, Debug)]
pub enum SketchKitError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Screen capture failed: {0}")]
    Capture(String),
}

/// A complete capture-to-drawing job definition.
///
/// Bundles the source image, the line-art tuning and the playback tuning
/// so a run is reproducible from one file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SketchJob {
    /// Source image standing in for a screen capture.
    pub input_path: String,
    /// Top-left corner of the drawing area, in destination coordinates.
    #[serde(default)]
    pub origin: [i32; 2],
    #[serde(default)]
    pub lineart: LineartConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl SketchJob {
    /// Load a job definition from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, SketchKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a job definition from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, SketchKitError> {
        let job: SketchJob = toml::from_str(content)?;
        Ok(job)
    }

    /// Load a job definition from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SketchKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a job definition from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SketchKitError> {
        let job: SketchJob = serde_json::from_str(content)?;
        Ok(job)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SketchKitError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(SketchKitError::UnsupportedFileFormat),
        }
    }

    /// Save the job definition to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SketchKitError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert the job to a TOML string
    pub fn to_toml(&self) -> Result<String, SketchKitError> {
        let toml = toml::to_string_pretty(&self)?;
        Ok(toml)
    }

    /// Save the job definition to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SketchKitError> {
        let content = self.to_json()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert the job to a JSON string
    pub fn to_json(&self) -> Result<String, SketchKitError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_keeps_tuning() {
        let job = SketchJob {
            input_path: "capture.png".into(),
            origin: [120, 240],
            lineart: LineartConfig {
                threshold_low: 30.0,
                threshold_high: 90.0,
                invert: true,
            },
            playback: PlaybackConfig {
                stroke_delay_ms: 10,
                point_stride: 2,
                pacing_secs: 0.01,
            },
        };
        let text = job.to_toml().unwrap();
        assert_eq!(SketchJob::from_toml(&text).unwrap(), job);
    }

    #[test]
    fn omitted_sections_fall_back_to_defaults() {
        let job = SketchJob::from_toml("input_path = \"shot.png\"").unwrap();
        assert_eq!(job.origin, [0, 0]);
        assert_eq!(job.lineart, LineartConfig::default());
        assert_eq!(job.playback, PlaybackConfig::default());
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        assert!(matches!(
            SketchJob::from_file("job.yaml"),
            Err(SketchKitError::UnsupportedFileFormat)
        ));
    }
}
