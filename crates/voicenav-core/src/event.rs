//! Outbound events and the sink they are published to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::goal::GoalPose;
use crate::room::RoomCategory;

/// Status reported on the status stream.
///
/// The colon-separated wire form (`navigating_to:kitchen`) is produced by
/// `Display` and only used at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavStatus {
    Detected {
        category: RoomCategory,
        confidence: f64,
    },
    NoRoomDetected,
    Error {
        message: String,
    },
    MapLoaded {
        generation_id: String,
    },
    NoMapLoaded,
    NavigatingTo {
        label: String,
    },
    RoomNotFound {
        category: RoomCategory,
    },
}

impl NavStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

impl fmt::Display for NavStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected {
                category,
                confidence,
            } => write!(f, "detected:{}:{:.2}", category, confidence),
            Self::NoRoomDetected => write!(f, "no_room_detected"),
            Self::Error { message } => write!(f, "error:{}", message),
            Self::MapLoaded { generation_id } => write!(f, "map_loaded:{}", generation_id),
            Self::NoMapLoaded => write!(f, "no_map_loaded"),
            Self::NavigatingTo { label } => write!(f, "navigating_to:{}", label),
            Self::RoomNotFound { category } => write!(f, "room_not_found:{}", category),
        }
    }
}

/// Everything this crate family publishes to its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEvent {
    /// A phrase resolved to a room category.
    Room { category: RoomCategory },
    Status { status: NavStatus },
    /// Goal for the motion layer.
    Goal { goal: GoalPose },
    /// Listing of the newest generations.
    AvailableMaps { summary: String },
}

impl NavEvent {
    pub fn status(status: NavStatus) -> Self {
        Self::Status { status }
    }
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room { category } => write!(f, "[room] {}", category),
            Self::Status { status } => write!(f, "[status] {}", status),
            Self::Goal { goal } => write!(
                f,
                "[goal] frame={} x={:.3} y={:.3} z={:.3}",
                goal.frame_id, goal.x, goal.y, goal.z
            ),
            Self::AvailableMaps { summary } => write!(f, "[maps]\n{}", summary),
        }
    }
}

/// Destination for outbound events.
///
/// Implementations must not block; a sink that can no longer deliver
/// returns an error instead.
pub trait NavEventSink: Send + Sync {
    fn publish(&self, event: NavEvent) -> Result<()>;
}
