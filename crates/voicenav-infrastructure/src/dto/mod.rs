//! On-disk formats written by the mapping pipeline.

pub mod map_metadata;
pub mod waypoints;

pub use map_metadata::{load_coordinate_reference, parse_coordinate_reference};
pub use waypoints::parse_waypoints;
