//! Application services: the map catalog, phrase dispatch and their wiring.

pub mod dispatcher;
pub mod map_catalog;
pub mod rescan;
pub mod sink;

pub use dispatcher::{DispatchOutcome, NavigationDispatcher, match_waypoint};
pub use map_catalog::{CatalogOptions, MapCatalog, ScanOutcome};
pub use rescan::spawn_rescan_loop;
pub use sink::{ChannelEventSink, event_channel};
