//! Coordinate-reference DTO (`map.yaml`).
//!
//! Only `resolution` and the first two `origin` components are read:
//!
//! ```text
//! image: map.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! ```

use serde::Deserialize;
use std::path::Path;

use voicenav_core::error::{NavError, Result};
use voicenav_core::generation::{CoordinateReference, DEFAULT_ORIGIN, DEFAULT_RESOLUTION};

#[derive(Debug, Deserialize)]
struct MapMetadataDto {
    #[serde(default)]
    resolution: Option<f64>,
    #[serde(default)]
    origin: Option<Vec<f64>>,
}

/// Parses a coordinate-reference record.
///
/// Missing keys take their defaults individually. An `origin` with fewer
/// than two components is rejected.
pub fn parse_coordinate_reference(yaml: &str) -> Result<CoordinateReference> {
    let dto: MapMetadataDto =
        serde_yaml::from_str(yaml).map_err(|e| NavError::serialization("YAML", e.to_string()))?;

    let (origin_x, origin_y) = match dto.origin.as_deref() {
        None => DEFAULT_ORIGIN,
        Some([x, y, ..]) => (*x, *y),
        Some(other) => {
            return Err(NavError::serialization(
                "YAML",
                format!("origin needs at least 2 components, got {}", other.len()),
            ));
        }
    };

    Ok(CoordinateReference {
        resolution: dto.resolution.unwrap_or(DEFAULT_RESOLUTION),
        origin_x,
        origin_y,
    })
}

/// Loads the coordinate reference at `path`, falling back to
/// [`CoordinateReference::default`] when the file is absent or malformed.
pub async fn load_coordinate_reference(path: &Path) -> CoordinateReference {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no coordinate reference, using defaults");
            return CoordinateReference::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read coordinate reference, using defaults");
            return CoordinateReference::default();
        }
    };

    parse_coordinate_reference(&text).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "malformed coordinate reference, using defaults");
        CoordinateReference::default()
    })
}
