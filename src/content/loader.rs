//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use crate::movement::MotionTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse the contents of a motion file. `file` is only used for error context.
pub fn parse_motion_file(contents: &str, file: &str) -> Result<MotionFile, ContentLoadError> {
    let data: MotionFile = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if data.schema_version != MOTION_SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                data.schema_version, MOTION_SCHEMA_VERSION
            ),
        });
    }

    Ok(data)
}

/// Load motion tuning from a RON file.
/// A missing file falls back to the built-in tuning; anything else unreadable is an error.
pub fn load_motion_tuning(path: &Path) -> Result<MotionTuning, ContentLoadError> {
    let file_name = path.display().to_string();

    if !path.exists() {
        warn!(
            "Motion file not found at {}, using built-in tuning",
            file_name
        );
        return Ok(MotionTuning::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_motion_file(&contents, &file_name).map(|data| data.tuning)
}
