//! Domain model for voice-driven room navigation.
//!
//! - [`resolver`]: phrase to [`RoomCategory`] with a confidence score
//! - [`generation`] / [`catalog`]: versioned maps and their named waypoints
//! - [`event`]: statuses, goals and the sink they are published to

pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod generation;
pub mod goal;
pub mod resolver;
pub mod room;
pub mod source;

pub use catalog::Catalog;
pub use config::NavConfig;
pub use error::{NavError, Result};
pub use event::{NavEvent, NavEventSink, NavStatus};
pub use generation::{CoordinateReference, MapGeneration, PixelPoint, Waypoint, WorldPoint};
pub use goal::{GoalPose, Orientation};
pub use resolver::{Resolution, RoomResolver};
pub use room::RoomCategory;
pub use source::GenerationSource;
