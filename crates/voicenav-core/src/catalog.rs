//! Immutable catalog snapshot.

use std::sync::Arc;

use crate::generation::MapGeneration;

/// One consistent view of the available generations plus the active one.
///
/// Snapshots are never mutated in place; the owner swaps in a new `Arc`
/// after every scan or selection so readers always see a coherent pair.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    generations: Vec<Arc<MapGeneration>>,
    active: Option<Arc<MapGeneration>>,
}

impl Catalog {
    /// Builds a catalog from scanned generations, sorted newest first.
    ///
    /// `active_id` is kept only if it names one of `generations`.
    pub fn new(mut generations: Vec<Arc<MapGeneration>>, active_id: Option<&str>) -> Self {
        generations.sort_by(|a, b| b.id().cmp(a.id()));
        let active = active_id.and_then(|id| generations.iter().find(|g| g.id() == id).cloned());
        Self {
            generations,
            active,
        }
    }

    /// Generations sorted by identifier, newest first.
    pub fn generations(&self) -> &[Arc<MapGeneration>] {
        &self.generations
    }

    pub fn newest(&self) -> Option<&Arc<MapGeneration>> {
        self.generations.first()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<MapGeneration>> {
        self.generations.iter().find(|g| g.id() == id)
    }

    pub fn active(&self) -> Option<&Arc<MapGeneration>> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref().map(MapGeneration::id)
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Returns a copy with `id` active, or `None` if `id` is not present.
    pub fn with_active(&self, id: &str) -> Option<Self> {
        let active = self.get(id)?.clone();
        Some(Self {
            generations: self.generations.clone(),
            active: Some(active),
        })
    }

    /// Human-readable listing of up to `limit` newest generations:
    /// `"<n>. <id> - <label>,<label>"`, one per line.
    pub fn summary(&self, limit: usize) -> String {
        self.generations
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, g)| {
                let labels: Vec<&str> = g.labels().collect();
                format!("{}. {} - {}", i + 1, g.id(), labels.join(","))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
