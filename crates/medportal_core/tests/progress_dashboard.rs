use medportal_core::db::open_db_in_memory;
use medportal_core::{
    BoardError, BoardSource, DashboardError, DashboardService, KeyValueStore, MemoryKeyValueStore,
    PhaseId, SqliteKeyValueStore, StorageError, StorageResult, StorageScope, Task,
    DASHBOARD_STORAGE_KEY,
};
use std::cell::Cell;
use std::collections::HashSet;

fn fixed_clock() -> i64 {
    1_700_000_000_000
}

/// Store whose writes fail, like browser storage in private mode.
struct ReadOnlyStore {
    writes: Cell<usize>,
}

impl KeyValueStore for ReadOnlyStore {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.writes.set(self.writes.get() + 1);
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        panic!("degraded service must not write");
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

fn tuples(tasks: &[Task]) -> HashSet<(i64, String, PhaseId, bool)> {
    tasks
        .iter()
        .map(|task| (task.id, task.text.clone(), task.phase, task.completed))
        .collect()
}

#[test]
fn empty_storage_loads_seed() {
    let service = DashboardService::load(MemoryKeyValueStore::new());
    assert_eq!(service.source(), BoardSource::Seed);
    assert_eq!(service.board().len(), 12);
    assert!(service.is_persistent());
}

#[test]
fn mutations_round_trip_through_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn, StorageScope::Local);

    let mut service = DashboardService::load_with_clock(&store, fixed_clock);
    let (new_id, _) = service
        .add_task("Revisar botiquines", PhaseId::Implementacion)
        .unwrap();
    assert_eq!(new_id, fixed_clock());
    service.toggle_task(new_id).unwrap();
    service.delete_task(1).unwrap();
    let expected = tuples(service.board().tasks());

    let reloaded = DashboardService::load(&store);
    assert_eq!(reloaded.source(), BoardSource::Stored);
    assert_eq!(tuples(reloaded.board().tasks()), expected);
    assert!(reloaded.board().get(new_id).unwrap().completed);
    assert!(reloaded.board().get(1).is_none());

    let raw = store.get_item(DASHBOARD_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["lastUpdated"], fixed_clock());
}

#[test]
fn legacy_array_is_accepted_on_load() {
    let store = MemoryKeyValueStore::new();
    store
        .set_item(
            DASHBOARD_STORAGE_KEY,
            r#"[{"id": 4, "text": "Antigua", "phase": "evaluacion", "completed": false}]"#,
        )
        .unwrap();
    let service = DashboardService::load(&store);
    assert_eq!(service.source(), BoardSource::Stored);
    assert_eq!(service.board().len(), 1);
    assert_eq!(service.board().tasks()[0].phase, PhaseId::Evaluacion);
}

#[test]
fn corrupt_record_falls_back_to_seed_without_overwriting() {
    let store = MemoryKeyValueStore::new();
    store.set_item(DASHBOARD_STORAGE_KEY, "{not json").unwrap();
    let mut service = DashboardService::load(&store);
    assert_eq!(service.source(), BoardSource::Seed);
    assert_eq!(service.board().len(), 12);
    assert!(!service.is_persistent());

    service.add_task("Solo en memoria", PhaseId::Evaluacion).unwrap();
    assert_eq!(service.board().len(), 13);
    assert_eq!(
        store.get_item(DASHBOARD_STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn unknown_phase_drops_only_that_task() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn, StorageScope::Local);
    store
        .set_item(
            DASHBOARD_STORAGE_KEY,
            r#"{"tasks":[
                {"id":100,"text":"Propia","phase":"diagnostico","completed":false},
                {"id":101,"text":"Fase retirada","phase":"cierre","completed":false}
            ],"lastUpdated":1}"#,
        )
        .unwrap();

    let mut service = DashboardService::load_with_clock(&store, fixed_clock);
    assert_eq!(service.source(), BoardSource::Stored);
    assert_eq!(service.board().len(), 1);
    assert!(service.is_persistent());

    service.add_task("nueva", PhaseId::Evaluacion).unwrap();
    let reloaded = DashboardService::load(&store);
    assert_eq!(reloaded.board().len(), 2);
    assert_eq!(reloaded.board().get(100).unwrap().text, "Propia");
    assert!(reloaded.board().get(fixed_clock()).is_some());
}

#[test]
fn record_without_last_updated_loads_stored_tasks() {
    let store = MemoryKeyValueStore::new();
    store
        .set_item(
            DASHBOARD_STORAGE_KEY,
            r#"{"tasks":[{"id":100,"text":"Sin fecha","phase":"implementacion","completed":true}]}"#,
        )
        .unwrap();

    let service = DashboardService::load(&store);
    assert_eq!(service.source(), BoardSource::Stored);
    assert_eq!(service.board().len(), 1);
    assert!(service.board().get(100).unwrap().completed);
}

#[test]
fn write_failure_degrades_to_memory_without_error() {
    let store = ReadOnlyStore {
        writes: Cell::new(0),
    };
    let mut service = DashboardService::load(&store);
    service.toggle_task(2).unwrap();
    assert!(!service.is_persistent());
    assert!(!service.board().get(2).unwrap().completed);

    service.add_task("Sigue funcionando", PhaseId::Diagnostico).unwrap();
    assert_eq!(service.board().len(), 13);
    assert_eq!(store.writes.get(), 1);
}

#[test]
fn read_failure_starts_in_memory_mode() {
    let mut service = DashboardService::load(BrokenStore);
    assert!(!service.is_persistent());
    service.delete_task(3).unwrap();
    assert_eq!(service.board().len(), 11);
}

#[test]
fn validation_errors_never_reach_storage() {
    let store = MemoryKeyValueStore::new();
    let mut service = DashboardService::load(&store);

    let err = service.add_task("   ", PhaseId::Diagnostico).unwrap_err();
    assert_eq!(err, DashboardError::Board(BoardError::EmptyText));
    let err = service.toggle_task(999).unwrap_err();
    assert_eq!(err, DashboardError::Board(BoardError::TaskNotFound(999)));
    assert!(store.is_empty());
}

#[test]
fn progress_uses_half_up_rounding() {
    let service = DashboardService::load(MemoryKeyValueStore::new());
    let progress = service.progress();
    let diagnostico = progress
        .iter()
        .find(|entry| entry.phase == PhaseId::Diagnostico)
        .unwrap();
    assert_eq!((diagnostico.completed, diagnostico.total), (2, 3));
    assert_eq!(diagnostico.percent, 67);
    let planificacion = progress
        .iter()
        .find(|entry| entry.phase == PhaseId::Planificacion)
        .unwrap();
    assert_eq!(planificacion.percent, 33);
}

#[test]
fn render_is_hidden_by_default_with_live_data() {
    let mut service = DashboardService::load(MemoryKeyValueStore::new());
    let view = service.toggle_task(4).unwrap();

    let html = view.render_html();
    assert_eq!(
        html,
        "<section class=\"dashboard\" id=\"progress-dashboard\" hidden></section>"
    );
    assert!(!service.board().get(4).unwrap().completed);
}

#[test]
fn enabled_render_lists_tasks_grouped_by_phase() {
    let mut service = DashboardService::load(MemoryKeyValueStore::new()).with_render_enabled(true);
    let view = service.delete_task(12).unwrap();

    let cards = view.find_by_class("phase-card");
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].get_attr("data-phase"), Some("diagnostico"));
    assert_eq!(view.find_by_class("task").len(), 11);
    assert_eq!(view.find_by_class("is-done").len(), 3);
    let percents: Vec<String> = view
        .find_by_class("phase-percent")
        .into_iter()
        .map(|element| medportal_core::ViewNode::from(element.clone()).text_content())
        .collect();
    assert_eq!(percents, vec!["67%", "33%", "0%", "0%"]);
}
