//! Map generations: one completed mapping run and its named waypoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolution used when a generation carries no usable coordinate reference.
pub const DEFAULT_RESOLUTION: f64 = 0.05;
/// Origin used when a generation carries no usable coordinate reference.
pub const DEFAULT_ORIGIN: (f64, f64) = (-10.0, -10.0);

/// Timestamp layout of generation directory suffixes (`20250213_120000`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Pixel-to-world coordinate reference of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateReference {
    /// Meters per pixel.
    pub resolution: f64,
    /// World coordinate of pixel (0, 0).
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for CoordinateReference {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            origin_x: DEFAULT_ORIGIN.0,
            origin_y: DEFAULT_ORIGIN.1,
        }
    }
}

impl CoordinateReference {
    /// `world = origin + pixel * resolution`, per axis.
    pub fn to_world(&self, pixel: PixelPoint) -> WorldPoint {
        WorldPoint {
            x: self.origin_x + pixel.x * self.resolution,
            y: self.origin_y + pixel.y * self.resolution,
            z: 0.0,
        }
    }
}

/// A position in map-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// A position in the world frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A named waypoint after coordinate conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Lowercased, trimmed label.
    pub label: String,
    pub pixel: PixelPoint,
    pub world: WorldPoint,
}

/// One completed mapping run.
///
/// Immutable once built; a changed directory on disk is represented by
/// building a new value on the next scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGeneration {
    id: String,
    timestamp: String,
    path: PathBuf,
    reference: CoordinateReference,
    waypoints: Vec<Waypoint>,
}

impl MapGeneration {
    /// Builds a generation from raw pixel waypoints.
    ///
    /// Labels are lowercased and trimmed; empty labels are dropped. A label
    /// seen again replaces the earlier coordinates but keeps the earlier
    /// position in iteration order.
    pub fn new(
        id: impl Into<String>,
        prefix: &str,
        path: impl Into<PathBuf>,
        reference: CoordinateReference,
        raw_waypoints: impl IntoIterator<Item = (String, PixelPoint)>,
    ) -> Self {
        let id = id.into();
        let timestamp = id.strip_prefix(prefix).unwrap_or(&id).to_string();

        let mut waypoints: Vec<Waypoint> = Vec::new();
        for (label, pixel) in raw_waypoints {
            let label = label.trim().to_lowercase();
            if label.is_empty() {
                continue;
            }
            let world = reference.to_world(pixel);
            tracing::debug!(
                generation = %id,
                label = %label,
                pixel_x = pixel.x,
                pixel_y = pixel.y,
                world_x = world.x,
                world_y = world.y,
                "waypoint converted"
            );

            let waypoint = Waypoint {
                label,
                pixel,
                world,
            };
            match waypoints.iter_mut().find(|w| w.label == waypoint.label) {
                Some(existing) => *existing = waypoint,
                None => waypoints.push(waypoint),
            }
        }

        Self {
            id,
            timestamp,
            path: path.into(),
            reference,
            waypoints,
        }
    }

    /// Directory name; also the sort key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Directory name with the generation prefix removed.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reference(&self) -> CoordinateReference {
        self.reference
    }

    /// Waypoints in file order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Looks up a waypoint by its (lowercase) label.
    pub fn waypoint(&self, label: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.waypoints.iter().map(|w| w.label.as_str())
    }

    /// Creation time parsed from the directory suffix, if it follows
    /// [`TIMESTAMP_FORMAT`].
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// `YYYY-MM-DD HH:MM:SS`, or the raw suffix when it cannot be parsed.
    pub fn display_time(&self) -> String {
        self.created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(x: f64, y: f64) -> PixelPoint {
        PixelPoint { x, y }
    }

    #[test]
    fn test_default_reference_transform() {
        let world = CoordinateReference::default().to_world(px(100.0, 200.0));
        assert_eq!(world, WorldPoint { x: -5.0, y: 0.0, z: 0.0 });
    }

    #[test]
    fn test_custom_reference_transform() {
        let reference = CoordinateReference {
            resolution: 0.1,
            origin_x: 1.0,
            origin_y: -2.0,
        };
        let world = reference.to_world(px(10.0, 40.0));
        assert_eq!(world, WorldPoint { x: 2.0, y: 2.0, z: 0.0 });
    }

    #[test]
    fn test_labels_are_normalized_and_deduplicated() {
        let generation = MapGeneration::new(
            "map_20250213_120000",
            "map_",
            "/tmp/map_20250213_120000",
            CoordinateReference::default(),
            vec![
                ("  Kitchen ".to_string(), px(0.0, 0.0)),
                ("Living Room".to_string(), px(10.0, 10.0)),
                ("   ".to_string(), px(1.0, 1.0)),
                ("KITCHEN".to_string(), px(20.0, 0.0)),
            ],
        );

        let labels: Vec<&str> = generation.labels().collect();
        assert_eq!(labels, vec!["kitchen", "living room"]);
        assert_eq!(generation.waypoint("kitchen").unwrap().world.x, -9.0);
    }

    #[test]
    fn test_timestamp_parsing() {
        let generation = MapGeneration::new(
            "map_20250213_120000",
            "map_",
            "/tmp/x",
            CoordinateReference::default(),
            Vec::new(),
        );
        assert_eq!(generation.timestamp(), "20250213_120000");
        assert_eq!(generation.display_time(), "2025-02-13 12:00:00");

        let odd = MapGeneration::new(
            "map_latest",
            "map_",
            "/tmp/y",
            CoordinateReference::default(),
            Vec::new(),
        );
        assert!(odd.created_at().is_none());
        assert_eq!(odd.display_time(), "latest");
    }
}
