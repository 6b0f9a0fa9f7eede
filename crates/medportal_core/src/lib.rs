//! Core domain logic for the medical department portal.
//! This crate is the single source of truth for portal state transitions.

pub mod config;
pub mod data;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod ui;

pub use config::{ConfigError, DashboardConfig, LoginConfig, SiteConfig};
pub use data::{builtin_catalog, find_group, org_groups};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::board::{
    completion_percent, BoardError, DecodedBoard, PhaseProgress, StoredBoard, TaskBoard,
    DASHBOARD_STORAGE_KEY,
};
pub use model::committee::{CommitteeCatalog, DocumentLinks, DEFAULT_MAX_SLOTS};
pub use model::org::{OrgGroup, Region, Sector, Staff};
pub use model::task::{seed_tasks, Phase, PhaseId, Task, PHASES};
pub use model::topic::Topic;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
    StorageScope,
};
pub use service::dashboard_service::{
    epoch_millis, BoardSource, DashboardError, DashboardResult, DashboardService,
};
pub use service::login_service::{GateState, LoginGate, LoginOutcome, SESSION_FLAG_KEY};
pub use service::slot_service::{assign_project_slots, next_free_slot};
pub use ui::accordion::{AccordionError, AccordionState, DisplayMode};
pub use ui::shell::{resolve_fragment, Layout, RouteResolution, ShellState, View};
pub use ui::view::{el, Element, ViewNode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
