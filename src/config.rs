//! Generation settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OperationError, Result};
use crate::math::{COINCIDENCE_TOLERANCE, MIN_SEGMENT_LENGTH};

/// Settings of a finishing session, loadable from TOML.
///
/// Missing keys take their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishConfig {
    /// Wall type used for finish walls, matched case-insensitively.
    pub finish_type_name: String,
    /// Preferred ceiling type; the first available type is used otherwise.
    pub ceiling_type_name: String,
    /// Preferred level for ceilings; the first level is used otherwise.
    pub level_name: String,
    /// Ceiling offset above its level.
    pub ceiling_height: f64,
    /// Finish wall height for spaces that report none.
    pub default_room_height: f64,
    /// Distance under which two points are the same point.
    pub coincidence_tolerance: f64,
    /// Boundary pieces shorter than this get no finish wall.
    pub min_segment_length: f64,
    pub generate_floors: bool,
    pub generate_ceilings: bool,
    pub generate_wall_finish: bool,
}

impl Default for FinishConfig {
    fn default() -> Self {
        Self {
            finish_type_name: String::new(),
            ceiling_type_name: "ACTCeiling".into(),
            level_name: "Level 0".into(),
            ceiling_height: 0.0,
            default_room_height: 3.0,
            coincidence_tolerance: COINCIDENCE_TOLERANCE,
            min_segment_length: MIN_SEGMENT_LENGTH,
            generate_floors: true,
            generate_ceilings: true,
            generate_wall_finish: true,
        }
    }
}

impl FinishConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the document does not parse.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| OperationError::InvalidInput(e.to_string()).into())
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OperationError::InvalidInput(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Serializes the settings back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| OperationError::Failed(e.to_string()).into())
    }

    /// Checks the settings before a session starts.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> {
            Err(OperationError::InvalidInput(msg.to_owned()).into())
        };

        if self.generate_wall_finish && self.finish_type_name.trim().is_empty() {
            return invalid("finish_type_name must not be empty");
        }
        if !(self.ceiling_height.is_finite() && self.ceiling_height >= 0.0) {
            return invalid("ceiling_height must be a non-negative number");
        }
        if !(self.default_room_height.is_finite() && self.default_room_height > 0.0) {
            return invalid("default_room_height must be positive");
        }
        if !(self.coincidence_tolerance.is_finite() && self.coincidence_tolerance > 0.0) {
            return invalid("coincidence_tolerance must be positive");
        }
        if !(self.min_segment_length.is_finite() && self.min_segment_length >= 0.0) {
            return invalid("min_segment_length must be a non-negative number");
        }
        Ok(())
    }
}
