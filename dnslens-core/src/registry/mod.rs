//! Device Registry
//!
//! Durable mapping from client IP addresses to named device records, plus
//! the reconciliation step that folds one analysis run's traffic back into
//! it. The registry is the only part of the system with cross-run state;
//! it is treated as a cache that can always be rebuilt from logs, so a
//! missing or corrupt backing file degrades to an empty map instead of
//! failing the run.

mod error;
mod insights;
mod reconcile;
mod render;
mod store;
pub mod types;

pub use error::RegistryError;
pub use reconcile::{
    ReconcileSummary, RoutingEntry, export_routing_table, reconcile, routing_table,
};
pub use render::render_device_table;
pub use store::DeviceRegistry;
