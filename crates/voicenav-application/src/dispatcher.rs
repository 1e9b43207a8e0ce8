//! Phrase-to-goal dispatch.

use std::sync::Arc;

use voicenav_core::config::{NavConfig, ResolverConfig};
use voicenav_core::error::Result;
use voicenav_core::event::{NavEvent, NavEventSink, NavStatus};
use voicenav_core::generation::{MapGeneration, Waypoint};
use voicenav_core::goal::GoalPose;
use voicenav_core::resolver::{Resolution, RoomResolver};
use voicenav_core::room::RoomCategory;

use crate::map_catalog::MapCatalog;

/// Terminal state of one [`NavigationDispatcher::dispatch`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// No alias matched, or the confidence gate rejected the match.
    NoRoom { resolution: Resolution },
    NoMap {
        category: RoomCategory,
        confidence: f64,
    },
    Matched {
        category: RoomCategory,
        confidence: f64,
        label: String,
        goal: GoalPose,
    },
    Unmatched {
        category: RoomCategory,
        confidence: f64,
    },
    Failed { message: String },
}

impl DispatchOutcome {
    /// Final status published for this outcome.
    pub fn status(&self) -> NavStatus {
        match self {
            Self::NoRoom { .. } => NavStatus::NoRoomDetected,
            Self::NoMap { .. } => NavStatus::NoMapLoaded,
            Self::Matched { label, .. } => NavStatus::NavigatingTo {
                label: label.clone(),
            },
            Self::Unmatched { category, .. } => NavStatus::RoomNotFound {
                category: *category,
            },
            Self::Failed { message } => NavStatus::error(message.clone()),
        }
    }

    pub fn goal(&self) -> Option<&GoalPose> {
        match self {
            Self::Matched { goal, .. } => Some(goal),
            _ => None,
        }
    }
}

/// Finds the first waypoint whose label contains, or is contained in, the
/// spaced category name. Iteration follows the generation's waypoint order;
/// the first hit wins.
pub fn match_waypoint(generation: &MapGeneration, category: RoomCategory) -> Option<&Waypoint> {
    let wanted = category.spaced_name();
    generation
        .waypoints()
        .iter()
        .find(|w| w.label.contains(&wanted) || wanted.contains(&w.label))
}

/// Turns recognized phrases into navigation goals.
///
/// Each call is independent: the only shared state is the catalog, read
/// once per call so a concurrent rescan cannot mix two generations.
pub struct NavigationDispatcher {
    resolver: RoomResolver,
    catalog: Arc<MapCatalog>,
    sink: Arc<dyn NavEventSink>,
    gate: ResolverConfig,
    frame_id: String,
}

impl NavigationDispatcher {
    pub fn new(
        resolver: RoomResolver,
        catalog: Arc<MapCatalog>,
        sink: Arc<dyn NavEventSink>,
        gate: ResolverConfig,
        frame_id: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            catalog,
            sink,
            gate,
            frame_id: frame_id.into(),
        }
    }

    /// Builds a dispatcher over the built-in alias table from `config`.
    pub fn from_config(
        config: &NavConfig,
        catalog: Arc<MapCatalog>,
        sink: Arc<dyn NavEventSink>,
    ) -> Self {
        Self::new(
            RoomResolver::new(),
            catalog,
            sink,
            config.resolver.clone(),
            config.navigation.frame_id.clone(),
        )
    }

    /// Handles one recognized phrase.
    ///
    /// Never fails: any error is reported as an `error:<message>` status and
    /// returned as [`DispatchOutcome::Failed`].
    pub async fn dispatch(&self, phrase: &str) -> DispatchOutcome {
        match self.try_dispatch(phrase).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(phrase = %phrase, error = %e, "dispatch failed");
                let outcome = DispatchOutcome::Failed {
                    message: e.to_string(),
                };
                if let Err(publish_error) = self.publish_status(outcome.status()) {
                    tracing::debug!(error = %publish_error, "error status not delivered");
                }
                outcome
            }
        }
    }

    async fn try_dispatch(&self, phrase: &str) -> Result<DispatchOutcome> {
        tracing::info!(phrase = %phrase.trim(), "phrase received");

        let resolution = self.resolver.resolve(phrase);
        let category = match resolution.category {
            Some(category) if self.gate.accepts(resolution.confidence) => category,
            Some(category) => {
                tracing::info!(
                    category = %category,
                    confidence = resolution.confidence,
                    threshold = self.gate.confidence_threshold,
                    "resolution below confidence threshold"
                );
                return self.finish(DispatchOutcome::NoRoom { resolution });
            }
            None => {
                tracing::warn!("no room detected");
                return self.finish(DispatchOutcome::NoRoom { resolution });
            }
        };
        let confidence = resolution.confidence;

        tracing::info!(
            category = %category,
            display = %category.display_name(&self.gate.display_language),
            confidence,
            "room detected"
        );
        self.sink.publish(NavEvent::Room { category })?;
        self.publish_status(NavStatus::Detected {
            category,
            confidence,
        })?;

        let Some(generation) = self.catalog.active().await else {
            tracing::warn!(category = %category, "no map loaded, cannot navigate");
            return self.finish(DispatchOutcome::NoMap {
                category,
                confidence,
            });
        };

        let Some(waypoint) = match_waypoint(&generation, category) else {
            tracing::warn!(
                category = %category,
                generation = %generation.id(),
                "room not found in map"
            );
            return self.finish(DispatchOutcome::Unmatched {
                category,
                confidence,
            });
        };

        let goal = GoalPose::new(&self.frame_id, waypoint.world);
        tracing::info!(
            label = %waypoint.label,
            generation = %generation.id(),
            x = goal.x,
            y = goal.y,
            "sending navigation goal"
        );
        self.sink.publish(NavEvent::Goal { goal: goal.clone() })?;

        self.finish(DispatchOutcome::Matched {
            category,
            confidence,
            label: waypoint.label.clone(),
            goal,
        })
    }

    fn finish(&self, outcome: DispatchOutcome) -> Result<DispatchOutcome> {
        self.publish_status(outcome.status())?;
        Ok(outcome)
    }

    fn publish_status(&self, status: NavStatus) -> Result<()> {
        self.sink.publish(NavEvent::status(status))
    }
}
