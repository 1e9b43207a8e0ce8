//! Map generation catalog with an active selection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use voicenav_core::catalog::Catalog;
use voicenav_core::config::CatalogConfig;
use voicenav_core::error::{NavError, Result};
use voicenav_core::event::{NavEvent, NavEventSink, NavStatus};
use voicenav_core::generation::MapGeneration;
use voicenav_core::source::GenerationSource;

/// Behavioural knobs of [`MapCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Activate the newest generation while nothing was selected explicitly.
    pub auto_load_latest: bool,
    /// `None` lets a scan run to completion.
    pub scan_timeout: Option<Duration>,
    /// Generations listed in the available-maps summary.
    pub summary_limit: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for CatalogOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            auto_load_latest: config.auto_load_latest,
            scan_timeout: config.scan_timeout(),
            summary_limit: config.summary_limit,
        }
    }
}

/// Result of a [`MapCatalog::refresh`] call.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The scan ran and its result is now the current snapshot.
    Applied(Arc<Catalog>),
    /// Another scan was already in flight; this request was dropped.
    Coalesced,
}

struct CatalogState {
    snapshot: Arc<Catalog>,
    /// Set once an external caller picked a generation by name.
    explicit_selection: bool,
}

/// Owns the current [`Catalog`] snapshot.
///
/// `MapCatalog` is responsible for:
/// - Scanning its [`GenerationSource`], at most one scan at a time
/// - Keeping the active generation a member of the latest scan
/// - Auto-activating the newest generation when configured
/// - Publishing `map_loaded` / `no_map_loaded` and available-maps events
///
/// Snapshots are replaced wholesale, so a reader holding an
/// `Arc<MapGeneration>` keeps a consistent resolution/origin/waypoint set
/// even while a rescan lands.
pub struct MapCatalog {
    source: Arc<dyn GenerationSource>,
    sink: Arc<dyn NavEventSink>,
    options: CatalogOptions,
    state: RwLock<CatalogState>,
    scan_guard: Mutex<()>,
}

impl MapCatalog {
    pub fn new(
        source: Arc<dyn GenerationSource>,
        sink: Arc<dyn NavEventSink>,
        options: CatalogOptions,
    ) -> Self {
        Self {
            source,
            sink,
            options,
            state: RwLock::new(CatalogState {
                snapshot: Arc::new(Catalog::default()),
                explicit_selection: false,
            }),
            scan_guard: Mutex::new(()),
        }
    }

    /// Current snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.state.read().await.snapshot.clone()
    }

    /// Currently active generation, if any.
    pub async fn active(&self) -> Option<Arc<MapGeneration>> {
        self.state.read().await.snapshot.active().cloned()
    }

    /// Rescans the source and swaps in the result.
    ///
    /// Returns [`ScanOutcome::Coalesced`] without scanning if another scan is
    /// in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or exceeds the scan timeout; the
    /// previous snapshot is left untouched in that case.
    pub async fn refresh(&self) -> Result<ScanOutcome> {
        let Ok(_guard) = self.scan_guard.try_lock() else {
            tracing::debug!("scan already in flight, coalescing");
            return Ok(ScanOutcome::Coalesced);
        };

        let scanned = match self.options.scan_timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.scan())
                .await
                .map_err(|_| {
                    NavError::Timeout(format!(
                        "scan of {} exceeded {:?}",
                        self.source.describe(),
                        limit
                    ))
                })??,
            None => self.source.scan().await?,
        };
        let generations: Vec<Arc<MapGeneration>> = scanned.into_iter().map(Arc::new).collect();

        let mut events = Vec::new();
        let snapshot = {
            let mut state = self.state.write().await;
            let previous = state.snapshot.active_id().map(str::to_string);
            let mut catalog = Catalog::new(generations, previous.as_deref());

            if let Some(previous) = &previous
                && catalog.active().is_none()
            {
                tracing::warn!(generation = %previous, "active generation disappeared");
                events.push(NavEvent::status(NavStatus::NoMapLoaded));
            }

            if catalog.active().is_none()
                && self.options.auto_load_latest
                && !state.explicit_selection
                && let Some(newest) = catalog.newest().map(|g| g.id().to_string())
                && let Some(selected) = catalog.with_active(&newest)
            {
                catalog = selected;
                log_loaded(&catalog);
                events.push(NavEvent::status(NavStatus::MapLoaded {
                    generation_id: newest,
                }));
            }

            if !catalog.is_empty() {
                events.push(NavEvent::AvailableMaps {
                    summary: catalog.summary(self.options.summary_limit),
                });
            }

            let snapshot = Arc::new(catalog);
            state.snapshot = snapshot.clone();
            snapshot
        };

        tracing::info!(
            source = %self.source.describe(),
            generations = snapshot.len(),
            active = ?snapshot.active_id(),
            "catalog refreshed"
        );
        for event in events {
            self.emit(event);
        }

        Ok(ScanOutcome::Applied(snapshot))
    }

    /// Activates the generation named `id` from the latest scan.
    ///
    /// Returns `false` and leaves the current selection alone if `id` is
    /// unknown.
    pub async fn select_active(&self, id: &str) -> bool {
        let selected = {
            let mut state = self.state.write().await;
            match state.snapshot.with_active(id) {
                Some(catalog) => {
                    log_loaded(&catalog);
                    state.snapshot = Arc::new(catalog);
                    state.explicit_selection = true;
                    true
                }
                None => false,
            }
        };

        if selected {
            self.emit(NavEvent::status(NavStatus::MapLoaded {
                generation_id: id.to_string(),
            }));
        } else {
            tracing::warn!(generation = %id, "cannot select unknown generation");
        }
        selected
    }

    /// Explicitly activates the newest generation of the latest scan.
    pub async fn select_latest(&self) -> Option<String> {
        let newest = self.snapshot().await.newest()?.id().to_string();
        self.select_active(&newest).await.then_some(newest)
    }

    fn emit(&self, event: NavEvent) {
        if let Err(e) = self.sink.publish(event) {
            tracing::warn!(error = %e, "failed to publish catalog event");
        }
    }
}

fn log_loaded(catalog: &Catalog) {
    if let Some(active) = catalog.active() {
        let labels: Vec<&str> = active.labels().collect();
        tracing::info!(
            generation = %active.id(),
            created = %active.display_time(),
            rooms = %labels.join(", "),
            "map loaded"
        );
    }
}
