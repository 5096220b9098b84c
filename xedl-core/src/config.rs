//! Conversion settings

use crate::{Error, Result};

/// Settings applied to a whole conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Frame rate used for every timecode in the run
    pub fps: u32,
    /// Title used when the sequence has no name
    pub default_sequence_name: String,
    /// Extension appended to the clip name when a clip has no media path
    pub fallback_extension: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            default_sequence_name: "Sequence 1".to_string(),
            fallback_extension: "mov".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Returns a copy of this configuration with a different frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Checks that the configuration can drive a conversion
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::InvalidFrameRate(self.fps));
        }
        Ok(())
    }
}
