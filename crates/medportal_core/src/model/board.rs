//! Task board state and its stored representation.
//!
//! # Responsibility
//! - Hold the mutable task list as an explicit value.
//! - Provide transitions that return a new board instead of mutating in place.
//! - Encode/decode the `{tasks, lastUpdated}` storage record.
//!
//! # Invariants
//! - Task ids stay unique after every transition.
//! - Blank task text never reaches the board.

use crate::model::task::{PhaseId, Task};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the persisted board.
pub const DASHBOARD_STORAGE_KEY: &str = "dashboard_data_v1";

/// Validation errors raised by board transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Task text is blank after trim.
    EmptyText,
    /// No task with the given id.
    TaskNotFound(i64),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for BoardError {}

/// Completion figures for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseProgress {
    pub phase: PhaseId,
    pub total: usize,
    pub completed: usize,
    /// Rounded half-up; 0 when the phase has no tasks.
    pub percent: u8,
}

/// Rounded completion percentage, half-up. Zero total yields 0.
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Immutable-by-convention task list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Builds a board, dropping later duplicates of an already-seen id.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if unique.iter().all(|existing| existing.id != task.id) {
                unique.push(task);
            }
        }
        Self { tasks: unique }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns a board with one new task appended.
    ///
    /// `now_ms` seeds the id; on collision the id moves past the current max.
    pub fn with_task_added(
        &self,
        text: &str,
        phase: PhaseId,
        now_ms: i64,
    ) -> Result<(Self, i64), BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyText);
        }

        let id = if self.get(now_ms).is_some() {
            self.tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
        } else {
            now_ms
        };

        let mut tasks = self.tasks.clone();
        tasks.push(Task::new(id, text, phase));
        Ok((Self { tasks }, id))
    }

    /// Returns a board with the completed flag of `id` flipped.
    pub fn with_task_toggled(&self, id: i64) -> Result<Self, BoardError> {
        let mut tasks = self.tasks.clone();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(BoardError::TaskNotFound(id))?;
        task.completed = !task.completed;
        Ok(Self { tasks })
    }

    /// Returns a board without the task `id`.
    pub fn with_task_removed(&self, id: i64) -> Result<Self, BoardError> {
        if self.get(id).is_none() {
            return Err(BoardError::TaskNotFound(id));
        }
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        Ok(Self { tasks })
    }

    /// Tasks ordered by phase index, then id ascending.
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|task| (task.phase.index(), task.id));
        sorted
    }

    pub fn phase_progress(&self, phase: PhaseId) -> PhaseProgress {
        let in_phase = self.tasks.iter().filter(|task| task.phase == phase);
        let (total, completed) = in_phase.fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });
        PhaseProgress {
            phase,
            total,
            completed,
            percent: completion_percent(completed, total),
        }
    }

    /// Progress for all four phases in display order.
    pub fn progress(&self) -> Vec<PhaseProgress> {
        PhaseId::ALL
            .into_iter()
            .map(|phase| self.phase_progress(phase))
            .collect()
    }
}

/// Current storage shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBoard {
    pub tasks: Vec<Task>,
    /// Write time in epoch ms; absent in records from older writers.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: i64,
}

/// Board read from storage plus the number of unreadable task entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBoard {
    pub board: TaskBoard,
    pub skipped: usize,
}

/// Serializes the board into the storage record.
pub fn encode_board(board: &TaskBoard, now_ms: i64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredBoard {
        tasks: board.tasks.clone(),
        last_updated: now_ms,
    })
}

/// Parses either the current record or the legacy bare array.
///
/// Entries that do not parse as a task (unknown phase, missing text, ...)
/// are skipped one by one; only an unreadable envelope is an error.
pub fn decode_board(raw: &str) -> Result<DecodedBoard, serde_json::Error> {
    let entries = match serde_json::from_str::<Value>(raw)? {
        Value::Array(entries) => entries,
        Value::Object(mut record) => match record.remove("tasks") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(shape_error("stored board has no `tasks` array")),
        },
        _ => return Err(shape_error("stored board must be an object or an array")),
    };

    let total = entries.len();
    let tasks: Vec<Task> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Task>(entry).ok())
        .collect();
    Ok(DecodedBoard {
        skipped: total - tasks.len(),
        board: TaskBoard::from_tasks(tasks),
    })
}

fn shape_error(message: &str) -> serde_json::Error {
    <serde_json::Error as serde::de::Error>::custom(message)
}

#[cfg(test)]
mod tests {
    use super::{completion_percent, decode_board, encode_board, BoardError, TaskBoard};
    use crate::model::task::{seed_tasks, PhaseId, Task};

    #[test]
    fn percent_rounds_half_up_and_handles_empty_phase() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 8), 13);
        assert_eq!(completion_percent(1, 200), 1);
        assert_eq!(completion_percent(4, 4), 100);
    }

    #[test]
    fn add_rejects_blank_text() {
        let board = TaskBoard::default();
        let err = board
            .with_task_added("   ", PhaseId::Diagnostico, 10)
            .unwrap_err();
        assert_eq!(err, BoardError::EmptyText);
    }

    #[test]
    fn add_moves_colliding_id_past_max() {
        let board = TaskBoard::from_tasks(seed_tasks());
        let (next, id) = board
            .with_task_added("Nueva", PhaseId::Evaluacion, 5)
            .unwrap();
        assert_eq!(id, 13);
        assert_eq!(next.len(), 13);
        assert_eq!(board.len(), 12);
    }

    #[test]
    fn sorted_tasks_follow_phase_then_id() {
        let board = TaskBoard::from_tasks(vec![
            Task::new(9, "c", PhaseId::Evaluacion),
            Task::new(3, "b", PhaseId::Diagnostico),
            Task::new(1, "a", PhaseId::Implementacion),
            Task::new(2, "d", PhaseId::Diagnostico),
        ]);
        let ids: Vec<i64> = board.sorted_tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 9]);
    }

    #[test]
    fn decode_accepts_legacy_bare_array() {
        let raw = r#"[{"id":1,"text":"x","phase":"diagnostico","completed":true}]"#;
        let board = decode_board(raw).unwrap().board;
        assert_eq!(board.len(), 1);
        assert!(board.tasks()[0].completed);
    }

    #[test]
    fn decode_skips_unreadable_tasks_and_keeps_the_rest() {
        let raw = r#"{"tasks":[
            {"id":100,"text":"Propia","phase":"diagnostico","completed":true},
            {"id":101,"text":"Rara","phase":"cierre"},
            {"id":102,"phase":"evaluacion"}
        ],"lastUpdated":1}"#;
        let decoded = decode_board(raw).unwrap();
        assert_eq!(decoded.skipped, 2);
        assert_eq!(decoded.board.len(), 1);
        assert_eq!(decoded.board.tasks()[0].id, 100);
    }

    #[test]
    fn decode_accepts_record_without_last_updated() {
        let raw = r#"{"tasks":[{"id":100,"text":"Sin fecha","phase":"planificacion"}]}"#;
        let decoded = decode_board(raw).unwrap();
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.board.len(), 1);
        assert!(!decoded.board.tasks()[0].completed);
    }

    #[test]
    fn decode_rejects_unknown_envelope() {
        assert!(decode_board(r#"{"items":[]}"#).is_err());
        assert!(decode_board("42").is_err());
    }

    #[test]
    fn encode_writes_last_updated_field() {
        let board = TaskBoard::from_tasks(seed_tasks());
        let raw = encode_board(&board, 1_700_000_000_000).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["lastUpdated"], 1_700_000_000_000_i64);
        assert_eq!(value["tasks"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn from_tasks_drops_duplicate_ids() {
        let board = TaskBoard::from_tasks(vec![
            Task::new(1, "first", PhaseId::Diagnostico),
            Task::new(1, "dup", PhaseId::Evaluacion),
        ]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.tasks()[0].text, "first");
    }
}
