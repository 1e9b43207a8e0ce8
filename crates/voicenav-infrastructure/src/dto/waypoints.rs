//! Waypoint list DTOs (`waypoints.xml`).
//!
//! The mapping pipeline writes one `<Waypoint>` element per named point:
//!
//! ```text
//! <Waypoints>
//!   <Waypoint>
//!     <Name>Kitchen</Name>
//!     <Pos_x>120</Pos_x>
//!     <Pos_y>85</Pos_y>
//!     ...
//!   </Waypoint>
//! </Waypoints>
//! ```
//!
//! Positions are in map-image pixels. Other child elements are ignored.

use serde::Deserialize;

use voicenav_core::error::{NavError, Result};
use voicenav_core::generation::PixelPoint;

#[derive(Debug, Deserialize)]
struct WaypointsDocument {
    #[serde(rename = "Waypoint", default)]
    waypoints: Vec<WaypointDto>,
}

#[derive(Debug, Deserialize)]
struct WaypointDto {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Pos_x", default)]
    pos_x: Option<String>,
    #[serde(rename = "Pos_y", default)]
    pos_y: Option<String>,
}

impl WaypointDto {
    /// Returns `None` when the label or either coordinate is missing or not
    /// a number.
    fn into_raw(self) -> Option<(String, PixelPoint)> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let x = self.pos_x?.trim().parse::<f64>().ok()?;
        let y = self.pos_y?.trim().parse::<f64>().ok()?;
        Some((name, PixelPoint { x, y }))
    }
}

/// Parses a waypoint list into raw `(label, pixel)` pairs in document order.
///
/// Incomplete waypoints are skipped with a warning; only a document that is
/// not well-formed fails.
pub fn parse_waypoints(xml: &str) -> Result<Vec<(String, PixelPoint)>> {
    let document: WaypointsDocument =
        quick_xml::de::from_str(xml).map_err(|e| NavError::serialization("XML", e.to_string()))?;

    let mut raw = Vec::with_capacity(document.waypoints.len());
    for (index, dto) in document.waypoints.into_iter().enumerate() {
        let label = dto.name.clone();
        match dto.into_raw() {
            Some(entry) => raw.push(entry),
            None => tracing::warn!(index, label = ?label, "skipping incomplete waypoint"),
        }
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Waypoints>
  <Waypoint>
    <Name>Living Room</Name>
    <Pos_x>100</Pos_x>
    <Pos_y>200</Pos_y>
    <Pos_z>0</Pos_z>
    <Ori_w>1</Ori_w>
  </Waypoint>
  <Waypoint>
    <Name>厨房</Name>
    <Pos_x>12.5</Pos_x>
    <Pos_y>-3</Pos_y>
  </Waypoint>
</Waypoints>"#;

        let raw = parse_waypoints(xml).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].0, "Living Room");
        assert_eq!(raw[0].1, PixelPoint { x: 100.0, y: 200.0 });
        assert_eq!(raw[1].0, "厨房");
        assert_eq!(raw[1].1, PixelPoint { x: 12.5, y: -3.0 });
    }

    #[test]
    fn test_incomplete_waypoints_are_skipped() {
        let xml = r#"<Waypoints>
  <Waypoint><Pos_x>1</Pos_x><Pos_y>2</Pos_y></Waypoint>
  <Waypoint><Name>study</Name><Pos_y>2</Pos_y></Waypoint>
  <Waypoint><Name>balcony</Name><Pos_x>abc</Pos_x><Pos_y>2</Pos_y></Waypoint>
  <Waypoint><Name>bedroom</Name><Pos_x>3</Pos_x><Pos_y>4</Pos_y></Waypoint>
</Waypoints>"#;

        let raw = parse_waypoints(xml).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].0, "bedroom");
    }

    #[test]
    fn test_interleaved_elements_and_padding() {
        let xml = r#"<Waypoints>
  <Waypoint><Name>kitchen</Name><Pos_x> 1 </Pos_x><Pos_y>2</Pos_y></Waypoint>
  <Meta>generated</Meta>
  <Waypoint><Name/><Pos_x>9</Pos_x><Pos_y>9</Pos_y></Waypoint>
  <Waypoint><Name>study</Name><Pos_x>3</Pos_x><Pos_y> 4</Pos_y></Waypoint>
</Waypoints>"#;

        let raw = parse_waypoints(xml).unwrap();
        assert_eq!(
            raw,
            vec![
                ("kitchen".to_string(), PixelPoint { x: 1.0, y: 2.0 }),
                ("study".to_string(), PixelPoint { x: 3.0, y: 4.0 }),
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_waypoints("<Waypoints></Waypoints>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_fails() {
        let err = parse_waypoints("<Waypoints><Waypoint>").unwrap_err();
        assert!(err.is_serialization());
    }
}
