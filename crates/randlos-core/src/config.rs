// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border removal configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{RandlosError, Result};

/// Default near-white cutoff for binarization.
pub const DEFAULT_THRESHOLD: u8 = 220;

/// Default line width (pixels) for the contour debug overlay.
pub const DEFAULT_CONTOUR_THICKNESS: u32 = 20;

/// Tunable settings for border removal.
///
/// Missing fields in a JSON file fall back to the defaults, so a config
/// containing only `{"threshold": 200}` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Samples at or above this value become white (255), the rest black (0).
    pub threshold: u8,
    /// Line width of the contours drawn on the debug overlay.
    pub contour_thickness: u32,
    /// Render the contour debug overlay alongside the result.
    pub debug_overlay: bool,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            contour_thickness: DEFAULT_CONTOUR_THICKNESS,
            debug_overlay: false,
        }
    }
}

impl BorderConfig {
    /// Reject values the pipeline cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.contour_thickness == 0 {
            return Err(RandlosError::Config(
                "contour_thickness must be at least 1 pixel".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(?config, "Border configuration loaded");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_document_scan_tuning() {
        let config = BorderConfig::default();
        assert_eq!(config.threshold, 220);
        assert_eq!(config.contour_thickness, 20);
        assert!(!config.debug_overlay);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: BorderConfig = serde_json::from_str(r#"{"threshold": 200}"#).unwrap();
        assert_eq!(config.threshold, 200);
        assert_eq!(config.contour_thickness, DEFAULT_CONTOUR_THICKNESS);
        assert!(!config.debug_overlay);
    }

    #[test]
    fn save_then_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("randlos.json");
        let config = BorderConfig {
            threshold: 180,
            contour_thickness: 4,
            debug_overlay: true,
        };
        config.save(&path).unwrap();
        assert_eq!(BorderConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn zero_thickness_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"contour_thickness": 0}"#).unwrap();
        let err = BorderConfig::load(&path).unwrap_err();
        assert!(matches!(err, RandlosError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ threshold: ").unwrap();
        let err = BorderConfig::load(&path).unwrap_err();
        assert!(matches!(err, RandlosError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BorderConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RandlosError::Io(_)));
    }
}
