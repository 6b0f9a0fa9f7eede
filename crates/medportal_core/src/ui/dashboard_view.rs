//! Progress dashboard renderer.

use crate::model::board::{PhaseProgress, TaskBoard};
use crate::model::task::{Task, PHASES};
use crate::ui::view::{el, Element, ViewNode};

/// DOM id of the dashboard container.
pub const DASHBOARD_CONTAINER_ID: &str = "progress-dashboard";

/// Renders the dashboard.
///
/// With `enabled == false` only an empty hidden container is produced; the
/// board itself is untouched either way.
pub fn render_dashboard(board: &TaskBoard, enabled: bool) -> ViewNode {
    let container = el("section")
        .attr("id", DASHBOARD_CONTAINER_ID)
        .class("dashboard");
    if !enabled {
        return container.flag("hidden").into();
    }

    let sorted = board.sorted_tasks();
    let phases = board.progress().into_iter().map(|progress| {
        let tasks = sorted
            .iter()
            .filter(|task| task.phase == progress.phase)
            .map(|task| render_task(task));
        render_phase(progress).child(el("ul").class("task-list").children(tasks))
    });

    container
        .child(el("h2").text("Avance del proyecto"))
        .child(render_add_form())
        .child(el("div").class("phase-grid").children(phases))
        .into()
}

fn render_phase(progress: PhaseProgress) -> Element {
    let phase = progress.phase.phase();
    el("article")
        .class("phase-card")
        .attr("data-phase", phase.id.as_str())
        .attr("style", format!("--phase-color: {}", phase.color))
        .child(
            el("header")
                .child(el("i").class(format!("icon-{}", phase.icon)))
                .child(el("h3").text(phase.name))
                .child(
                    el("span")
                        .class("phase-percent")
                        .text(format!("{}%", progress.percent)),
                ),
        )
        .child(
            el("div").class("progress-track").child(
                el("div")
                    .class("progress-fill")
                    .attr("style", format!("width: {}%", progress.percent)),
            ),
        )
        .child(el("p").class("phase-count").text(format!(
            "{} de {} completadas",
            progress.completed, progress.total
        )))
}

fn render_task(task: &Task) -> Element {
    el("li")
        .class("task")
        .class_if(task.completed, "is-done")
        .attr("data-task-id", task.id.to_string())
        .child(
            el("input")
                .attr("type", "checkbox")
                .attr("data-action", "toggle")
                .flag_if(task.completed, "checked"),
        )
        .child(el("span").class("task-text").text(task.text.as_str()))
        .child(
            el("button")
                .attr("type", "button")
                .attr("data-action", "delete")
                .attr("aria-label", "Eliminar tarea")
                .text("×"),
        )
}

fn render_add_form() -> Element {
    let options = PHASES.iter().map(|phase| {
        el("option")
            .attr("value", phase.id.as_str())
            .text(phase.name)
    });
    el("form")
        .class("task-form")
        .attr("data-action", "add")
        .child(
            el("input")
                .attr("type", "text")
                .attr("name", "text")
                .attr("placeholder", "Nueva tarea")
                .flag("required"),
        )
        .child(el("select").attr("name", "phase").children(options))
        .child(el("button").attr("type", "submit").text("Agregar"))
}
