//! Where settings live on disk, and loading the optional threshold
//! overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::alignment::AlignmentConfig;

const APP_DIR: &str = "guide-frame";
const PLACEMENTS_FILE: &str = "guide_positions.json";
const ALIGNMENT_FILE: &str = "alignment.json";

/// Per-user settings directory, or the working directory when the platform
/// has none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn placements_path() -> PathBuf {
    config_dir().join(PLACEMENTS_FILE)
}

pub fn alignment_path() -> PathBuf {
    config_dir().join(ALIGNMENT_FILE)
}

/// Load threshold overrides from `path`. Missing fields keep their defaults;
/// a missing or unreadable file yields the defaults.
pub fn load_alignment_config(path: &Path) -> AlignmentConfig {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded alignment thresholds from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {:?}: {}, using defaults", path, e);
                AlignmentConfig::default()
            }
        },
        Err(_) => {
            log::debug!("No alignment overrides at {:?}", path);
            AlignmentConfig::default()
        }
    }
}
