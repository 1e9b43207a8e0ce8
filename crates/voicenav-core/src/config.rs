//! Configuration model.
//!
//! Mirrors `config.toml`; every field has a default so a partial (or absent)
//! file yields a complete configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Default tracing filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
    pub catalog: CatalogConfig,
    pub resolver: ResolverConfig,
    pub navigation: NavigationConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            catalog: CatalogConfig::default(),
            resolver: ResolverConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base directory holding generation folders. Absolute, `~`-prefixed,
    /// or relative to the ROS workspace.
    pub maps_path: String,
    pub folder_prefix: String,
    pub waypoints_filename: String,
    pub metadata_filename: String,
    pub image_filename: String,
    /// Seconds between periodic rescans; `0` disables them.
    pub discovery_interval_secs: u64,
    /// Activate the newest generation when nothing was selected explicitly.
    pub auto_load_latest: bool,
    /// Seconds a scan may take; `0` disables the limit.
    pub scan_timeout_secs: u64,
    /// Generations included in the available-maps summary.
    pub summary_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            maps_path: "src/clip_sam_semantic_mapping/results/waypoints".to_string(),
            folder_prefix: "map_".to_string(),
            waypoints_filename: "waypoints.xml".to_string(),
            metadata_filename: "map.yaml".to_string(),
            image_filename: "map.pgm".to_string(),
            discovery_interval_secs: 10,
            auto_load_latest: true,
            scan_timeout_secs: 30,
            summary_limit: 5,
        }
    }
}

impl CatalogConfig {
    pub fn discovery_interval(&self) -> Option<Duration> {
        (self.discovery_interval_secs > 0).then(|| Duration::from_secs(self.discovery_interval_secs))
    }

    /// `None` when `scan_timeout_secs` is `0`, i.e. scans are never cut off.
    pub fn scan_timeout(&self) -> Option<Duration> {
        (self.scan_timeout_secs > 0).then(|| Duration::from_secs(self.scan_timeout_secs))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub confidence_threshold: f64,
    /// When false the threshold is only reported, never enforced.
    pub enforce_threshold: bool,
    pub display_language: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            enforce_threshold: false,
            display_language: "zh_CN".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Whether a resolution with `confidence` may proceed to navigation.
    pub fn accepts(&self, confidence: f64) -> bool {
        !self.enforce_threshold || confidence >= self.confidence_threshold
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Frame the emitted goal poses are expressed in.
    pub frame_id: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            frame_id: "map".to_string(),
        }
    }
}
