//! Subcommand implementations.

use crate::error::CliError;
use medportal_core::db::{open_db, open_db_in_memory};
use medportal_core::ui::page::{render_page, PageModel};
use medportal_core::{
    assign_project_slots, builtin_catalog, find_group, next_free_slot, org_groups, resolve_fragment,
    AccordionState, DashboardService, Layout, LoginGate, LoginOutcome, PhaseId, ShellState,
    SiteConfig, SqliteKeyValueStore, StorageScope, Topic, PHASES,
};
use medportal_tools::{
    credential_path_from_env, generate_icons, provision_roster, MemoryAccountDirectory,
    ProvisionError, RecordOutcome, RestAccountDirectory, ServiceAccount, ROSTER,
};
use log::{info, warn};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub fragment: String,
    pub width: u32,
    pub standalone: bool,
    pub open_group: Option<String>,
    pub open_region: Option<String>,
    pub out: Option<PathBuf>,
}

/// Opens the configured database, falling back to memory when it cannot be opened.
fn open_storage(config: &SiteConfig) -> Result<Connection, CliError> {
    let path = config.storage_path_or_default();
    match open_db(&path) {
        Ok(conn) => Ok(conn),
        Err(err) => {
            warn!(
                "event=storage_open module=cli status=degraded path={} error={}",
                path.display(),
                err
            );
            Ok(open_db_in_memory()?)
        }
    }
}

fn dashboard<'a>(
    config: &SiteConfig,
    conn: &'a Connection,
) -> DashboardService<SqliteKeyValueStore<'a>> {
    DashboardService::load(SqliteKeyValueStore::new(conn, StorageScope::Local))
        .with_render_enabled(config.dashboard.render_enabled)
}

pub fn render(config: &SiteConfig, args: RenderArgs) -> Result<(), CliError> {
    let route = resolve_fragment(&args.fragment);
    if route.rewrite {
        info!(
            "event=route_rewrite module=cli status=ok from={} to={}",
            args.fragment,
            route.view.fragment()
        );
    }

    let layout = Layout::detect(args.width, args.standalone);
    let shell = ShellState::new(&args.fragment, layout);
    let groups = org_groups();
    validate_open_targets(args.open_group.as_deref(), args.open_region.as_deref())?;
    let mut accordion = AccordionState::new(groups, layout.accordion_mode());
    if let Some(group_id) = args.open_group.as_deref() {
        accordion = accordion.set_group_open(group_id, true)?;
    }
    if let Some(region_id) = args.open_region.as_deref() {
        accordion = accordion.set_region_open(region_id, true)?;
    }

    let conn = open_storage(config)?;
    let session = SqliteKeyValueStore::new(&conn, StorageScope::Session);
    let gate = LoginGate::from_config(&config.login).on_load(&session);
    let catalog = builtin_catalog().with_slot_overrides(&config.committee_slots);

    let html = render_page(PageModel {
        shell: &shell,
        accordion: &accordion,
        groups,
        catalog: &catalog,
        dashboard: dashboard(config, &conn).render(),
        gate,
    });

    match args.out {
        Some(path) => std::fs::write(&path, html).map_err(|err| {
            CliError::Input(format!("failed to write `{}`: {err}", path.display()))
        }),
        None => {
            println!("{html}");
            Ok(())
        }
    }
}

/// Rejects a group id outside the org chart and a region outside that group.
fn validate_open_targets(group_id: Option<&str>, region_id: Option<&str>) -> Result<(), CliError> {
    let Some(group_id) = group_id else {
        return Ok(());
    };
    let group = find_group(group_id)
        .ok_or_else(|| CliError::Input(format!("unknown org group `{group_id}`")))?;
    match region_id {
        Some(region_id) if group.region(region_id).is_none() => Err(CliError::Input(format!(
            "region `{region_id}` does not belong to group `{group_id}`"
        ))),
        _ => Ok(()),
    }
}

pub fn tasks_list(config: &SiteConfig, as_json: bool) -> Result<(), CliError> {
    let conn = open_storage(config)?;
    let service = dashboard(config, &conn);
    let board = service.board();

    if as_json {
        let progress: Vec<Value> = service
            .progress()
            .iter()
            .map(|entry| {
                json!({
                    "phase": entry.phase.as_str(),
                    "total": entry.total,
                    "completed": entry.completed,
                    "percent": entry.percent,
                })
            })
            .collect();
        let output = json!({ "tasks": board.sorted_tasks(), "progress": progress });
        println!("{output:#}");
        return Ok(());
    }

    for phase in PHASES.iter() {
        let progress = board.phase_progress(phase.id);
        println!(
            "{} {}% ({}/{})",
            phase.name, progress.percent, progress.completed, progress.total
        );
        for task in board.sorted_tasks().into_iter().filter(|task| task.phase == phase.id) {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{mark}] {:>14} {}", task.id, task.text);
        }
    }
    Ok(())
}

pub fn tasks_add(config: &SiteConfig, text: &str, phase: PhaseId) -> Result<(), CliError> {
    let conn = open_storage(config)?;
    let mut service = dashboard(config, &conn);
    let (id, _) = service.add_task(text, phase)?;
    println!("added {id}");
    Ok(())
}

pub fn tasks_toggle(config: &SiteConfig, id: i64) -> Result<(), CliError> {
    let conn = open_storage(config)?;
    let mut service = dashboard(config, &conn);
    service.toggle_task(id)?;
    let completed = service.board().get(id).map(|task| task.completed).unwrap_or(false);
    println!("{id} completed={completed}");
    Ok(())
}

pub fn tasks_delete(config: &SiteConfig, id: i64) -> Result<(), CliError> {
    let conn = open_storage(config)?;
    let mut service = dashboard(config, &conn);
    service.delete_task(id)?;
    println!("deleted {id}");
    Ok(())
}

pub fn slots(config: &SiteConfig, committee_id: &str, input: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(input)
        .map_err(|err| CliError::Input(format!("failed to read `{}`: {err}", input.display())))?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|err| CliError::Input(format!("invalid JSON in `{}`: {err}", input.display())))?;
    let records = value
        .as_array()
        .ok_or_else(|| CliError::Input("topics file must hold a JSON array".to_string()))?;

    let topics: Vec<Topic> = records.iter().map(Topic::from_legacy_json).collect();
    let catalog = builtin_catalog().with_slot_overrides(&config.committee_slots);
    let assigned = assign_project_slots(&topics, &catalog, committee_id);
    let output = json!({
        "committee": committee_id,
        "maxSlots": catalog.max_slots(committee_id),
        "topics": assigned,
        "nextFreeSlot": next_free_slot(&assigned, &catalog, committee_id),
    });
    println!("{output:#}");
    Ok(())
}

pub fn login(config: &SiteConfig, password: &str, logout: bool) -> Result<(), CliError> {
    let conn = open_storage(config)?;
    let session = SqliteKeyValueStore::new(&conn, StorageScope::Session);
    let gate = LoginGate::from_config(&config.login);

    if logout {
        gate.logout(&session);
        println!("logged out");
        return Ok(());
    }

    match gate.submit(password, &session) {
        LoginOutcome::Bypassed => {
            println!("no access key configured; gate bypassed");
            Ok(())
        }
        LoginOutcome::Granted => {
            println!("access granted");
            Ok(())
        }
        LoginOutcome::EmptyPassword { hint } => Err(CliError::Denied(hint.to_string())),
        LoginOutcome::Rejected { message, .. } => Err(CliError::Denied(message.to_string())),
    }
}

pub fn provision(dry_run: bool) -> Result<(), CliError> {
    let now = chrono::Utc::now();
    let outcomes = if dry_run {
        let mut directory = MemoryAccountDirectory::new();
        provision_roster(&mut directory, ROSTER, now)
    } else {
        let path = credential_path_from_env(|name| std::env::var(name).ok())?;
        let account = ServiceAccount::from_file(&path)?;
        info!(
            "event=provision_start module=cli status=ok project={} records={}",
            account.project_id,
            ROSTER.len()
        );
        let mut directory =
            RestAccountDirectory::new(account).map_err(ProvisionError::from)?;
        provision_roster(&mut directory, ROSTER, now)
    };

    let mut failed = 0_usize;
    for outcome in &outcomes {
        match outcome {
            RecordOutcome::Created { uid } => println!("created {uid}"),
            RecordOutcome::Merged { uid } => println!("merged  {uid}"),
            RecordOutcome::Failed { email, error } => {
                failed += 1;
                println!("failed  {email}: {error}");
            }
        }
    }
    println!("{} records, {} failed", outcomes.len(), failed);
    Ok(())
}

pub fn icons(source: &Path, out_dir: &Path) -> Result<(), CliError> {
    for path in generate_icons(source, out_dir)? {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_open_targets;
    use crate::error::CliError;

    #[test]
    fn open_targets_must_exist_in_the_org_chart() {
        assert!(validate_open_targets(None, Some("sur-concepcion")).is_ok());
        assert!(validate_open_targets(Some("sur"), Some("sur-concepcion")).is_ok());
        assert!(matches!(
            validate_open_targets(Some("oeste"), None),
            Err(CliError::Input(message)) if message.contains("oeste")
        ));
        assert!(matches!(
            validate_open_targets(Some("norte"), Some("sur-concepcion")),
            Err(CliError::Input(_))
        ));
    }
}
