// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at start-up from a YAML file. The path comes from
//! the `BLOC_CONFIG` environment variable, falling back to `bloc.yaml` in
//! the working directory. Every field has a default, so the file may be
//! partial or absent.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "BLOC_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "bloc.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Distance from the first vertex, in device pixels, within which a
    /// click closes the shape being drawn.
    pub close_threshold_px: f64,
    /// Drawn radius of vertex handles on the selected shape.
    pub vertex_handle_radius_px: f32,
    /// Pick radius of vertex handles.
    pub vertex_hit_radius_px: f64,
    /// Vertical space kept free for controls when fitting the board image
    /// in the problem view.
    pub canvas_ui_offset_px: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            close_threshold_px: 10.0,
            vertex_handle_radius_px: 6.0,
            vertex_hit_radius_px: 8.0,
            canvas_ui_offset_px: 200.0,
            window_width: 1280.0,
            window_height: 720.0,
        }
    }
}

impl AppConfig {
    /// Load settings, falling back to defaults when no usable file exists.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Parse settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join("bloc_config_partial.yaml");
        std::fs::write(&path, "close_threshold_px: 14.0\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.close_threshold_px, 14.0);
        assert_eq!(config.vertex_hit_radius_px, AppConfig::default().vertex_hit_radius_px);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join("bloc_config_malformed.yaml");
        std::fs::write(&path, "close_threshold_px: [not a number\n").unwrap();

        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
