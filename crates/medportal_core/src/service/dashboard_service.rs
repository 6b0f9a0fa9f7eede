//! Progress dashboard use-case service.
//!
//! # Responsibility
//! - Load the task board from storage with current, legacy and seed fallbacks.
//! - Apply add/toggle/delete, persist after each, and re-render.
//!
//! # Invariants
//! - Storage failures never surface to callers; the service degrades to a
//!   memory-only mode and logs a warning.
//! - A stored record that cannot be read is never overwritten.
//! - Validation failures (blank text, unknown id) never reach storage.

use crate::model::board::{
    decode_board, encode_board, BoardError, PhaseProgress, TaskBoard, DASHBOARD_STORAGE_KEY,
};
use crate::model::task::{seed_tasks, PhaseId};
use crate::repo::kv_store::KeyValueStore;
use crate::ui::dashboard_view::render_dashboard;
use crate::ui::view::ViewNode;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors visible to dashboard callers. Storage problems are not among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    Board(BoardError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
        }
    }
}

impl From<BoardError> for DashboardError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

/// Where the initial board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSource {
    Stored,
    Seed,
}

/// Milliseconds since the unix epoch, clamped to 0 before it.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Dashboard facade over a key/value store.
pub struct DashboardService<S: KeyValueStore> {
    store: S,
    board: TaskBoard,
    source: BoardSource,
    persistent: bool,
    render_enabled: bool,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> DashboardService<S> {
    /// Loads the board from `store`; rendering starts disabled.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, epoch_millis)
    }

    pub fn load_with_clock(store: S, clock: fn() -> i64) -> Self {
        let (board, source, persistent) = match store.get_item(DASHBOARD_STORAGE_KEY) {
            Ok(Some(raw)) => match decode_board(&raw) {
                Ok(decoded) => {
                    if decoded.skipped > 0 {
                        warn!(
                            "event=dashboard_load module=dashboard status=partial skipped={} kept={}",
                            decoded.skipped,
                            decoded.board.len()
                        );
                    }
                    (decoded.board, BoardSource::Stored, true)
                }
                Err(err) => {
                    // Unreadable record stays on disk untouched; edits live in memory.
                    warn!(
                        "event=dashboard_load module=dashboard status=degraded reason=decode_failed error={}",
                        err
                    );
                    (TaskBoard::from_tasks(seed_tasks()), BoardSource::Seed, false)
                }
            },
            Ok(None) => (TaskBoard::from_tasks(seed_tasks()), BoardSource::Seed, true),
            Err(err) => {
                warn!(
                    "event=dashboard_load module=dashboard status=degraded reason=storage_unavailable error={}",
                    err
                );
                (TaskBoard::from_tasks(seed_tasks()), BoardSource::Seed, false)
            }
        };

        info!(
            "event=dashboard_load module=dashboard status=ok source={:?} tasks={} persistent={}",
            source,
            board.len(),
            persistent
        );

        Self {
            store,
            board,
            source,
            persistent,
            render_enabled: false,
            clock,
        }
    }

    /// Enables or disables the full render path. Data handling is unaffected.
    pub fn with_render_enabled(mut self, enabled: bool) -> Self {
        self.render_enabled = enabled;
        self
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn source(&self) -> BoardSource {
        self.source
    }

    /// `false` once storage failed; later mutations stay in memory.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn render_enabled(&self) -> bool {
        self.render_enabled
    }

    pub fn progress(&self) -> Vec<PhaseProgress> {
        self.board.progress()
    }

    /// Adds a task, persists, and returns the re-rendered view.
    pub fn add_task(&mut self, text: &str, phase: PhaseId) -> DashboardResult<(i64, ViewNode)> {
        let (board, id) = self.board.with_task_added(text, phase, (self.clock)())?;
        self.commit(board, "add");
        Ok((id, self.render()))
    }

    pub fn toggle_task(&mut self, id: i64) -> DashboardResult<ViewNode> {
        let board = self.board.with_task_toggled(id)?;
        self.commit(board, "toggle");
        Ok(self.render())
    }

    pub fn delete_task(&mut self, id: i64) -> DashboardResult<ViewNode> {
        let board = self.board.with_task_removed(id)?;
        self.commit(board, "delete");
        Ok(self.render())
    }

    pub fn render(&self) -> ViewNode {
        render_dashboard(&self.board, self.render_enabled)
    }

    /// Consumes the service and hands back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self, board: TaskBoard, action: &str) {
        self.board = board;
        if !self.persistent {
            return;
        }

        let result = encode_board(&self.board, (self.clock)())
            .map_err(|err| err.to_string())
            .and_then(|raw| {
                self.store
                    .set_item(DASHBOARD_STORAGE_KEY, &raw)
                    .map_err(|err| err.to_string())
            });
        match result {
            Ok(()) => info!(
                "event=dashboard_save module=dashboard status=ok action={} tasks={}",
                action,
                self.board.len()
            ),
            Err(err) => {
                self.persistent = false;
                warn!(
                    "event=dashboard_save module=dashboard status=degraded action={} error={}",
                    action, err
                );
            }
        }
    }
}
