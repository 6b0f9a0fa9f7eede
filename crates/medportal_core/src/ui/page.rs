//! Full page assembly for one route.

use crate::model::committee::CommitteeCatalog;
use crate::model::org::OrgGroup;
use crate::service::login_service::GateState;
use crate::ui::accordion::AccordionState;
use crate::ui::org_chart_view::render_org_chart;
use crate::ui::shell::{Layout, ShellState, View};
use crate::ui::view::{el, Element, ViewNode};

/// Inputs needed to render one page.
pub struct PageModel<'a> {
    pub shell: &'a ShellState,
    pub accordion: &'a AccordionState,
    pub groups: &'a [OrgGroup],
    pub catalog: &'a CommitteeCatalog,
    pub dashboard: ViewNode,
    pub gate: GateState,
}

/// Renders a complete HTML document.
pub fn render_page(model: PageModel<'_>) -> String {
    let mut body = el("body")
        .attr("data-view", model.shell.view().fragment())
        .class(match model.shell.layout() {
            Layout::Desktop => "layout-desktop",
            Layout::Compact => "layout-compact",
        })
        .child(render_header(model.shell))
        .child(render_side_menu(model.shell));

    let mut main = el("main");
    for view in View::ALL {
        let content = match view {
            View::Carrete => render_carrete(model.dashboard.clone()),
            View::Estructura => el("div").child(render_org_chart(model.groups, model.accordion)),
            View::Comites => render_committees(model.catalog),
            View::Foro => render_forum(),
        };
        main = main.child(
            el("section")
                .attr("id", view.fragment())
                .class("page-section")
                .class_if(view == model.shell.view(), "is-active")
                .flag_if(!model.shell.is_section_visible(view), "hidden")
                .child(content),
        );
    }
    body = body.child(main);

    let nav = model.shell.bottom_nav();
    if !nav.is_empty() {
        body = body.child(el("nav").class("bottom-nav").children(nav.into_iter().map(|item| {
            el("a")
                .attr("href", format!("#{}", item.view.fragment()))
                .class("bottom-nav-item")
                .class_if(item.active, "is-active")
                .child(el("i").class(format!("icon-{}", item.view.icon())))
                .child(el("span").text(item.view.label()))
        })));
    }
    body = body.child(render_login_modal(model.gate));

    let document: ViewNode = el("html")
        .attr("lang", "es")
        .child(
            el("head")
                .child(el("meta").attr("charset", "utf-8"))
                .child(
                    el("meta")
                        .attr("name", "viewport")
                        .attr("content", "width=device-width, initial-scale=1"),
                )
                .child(el("title").text("Departamento Médico"))
                .child(el("link").attr("rel", "manifest").attr("href", "manifest.json"))
                .child(el("link").attr("rel", "stylesheet").attr("href", "styles.css")),
        )
        .child(body)
        .into();
    format!("<!DOCTYPE html>{}", document.render_html())
}

fn render_header(shell: &ShellState) -> Element {
    el("header").class("top-bar").child(
        el("button")
            .class("menu-toggle")
            .attr("type", "button")
            .attr("aria-controls", "side-menu")
            .attr("aria-expanded", shell.menu_open().to_string())
            .text("Menú"),
    )
    .child(el("h1").text("Departamento Médico"))
}

fn render_side_menu(shell: &ShellState) -> Element {
    el("nav")
        .attr("id", "side-menu")
        .class("side-menu")
        .class_if(shell.menu_open(), "is-open")
        .child(el("ul").children(View::ALL.into_iter().map(|view| {
            el("li").child(
                el("a")
                    .attr("href", format!("#{}", view.fragment()))
                    .class_if(view == shell.view(), "is-active")
                    .text(view.label()),
            )
        })))
}

fn render_carrete(dashboard: ViewNode) -> Element {
    el("div")
        .class("carrete")
        .child(el("h2").text("Novedades del departamento"))
        .child(
            el("div").class("carousel").children(
                ["Campaña de vacunación", "Exámenes preventivos", "Pausas activas"]
                    .into_iter()
                    .map(|title| el("figure").class("slide").child(el("figcaption").text(title))),
            ),
        )
        .child(dashboard)
}

fn render_committees(catalog: &CommitteeCatalog) -> Element {
    let cards = catalog.committees().iter().map(|committee| {
        let max_slots = catalog.max_slots(committee.id);
        let projects = (1..=max_slots).map(|slot| {
            let links = catalog.project_links(committee.id, slot);
            let mut item = el("li")
                .class("project-slot")
                .class_if(links.is_empty(), "is-empty")
                .attr("data-slot", slot.to_string())
                .child(el("span").text(format!("Proyecto {slot}")));
            for (label, url) in [
                ("Carpeta", links.folder),
                ("Documento", links.doc),
                ("Presentación", links.ppt),
            ] {
                if !url.is_empty() {
                    item = item.child(
                        el("a")
                            .attr("href", url)
                            .attr("target", "_blank")
                            .attr("rel", "noopener")
                            .text(label),
                    );
                }
            }
            item
        });
        el("article")
            .class("committee")
            .attr("data-committee", committee.id)
            .child(el("h3").text(committee.name))
            .child(el("ul").children(projects))
    });
    el("div")
        .class("committees")
        .child(el("h2").text("Comités"))
        .children(cards)
}

fn render_forum() -> Element {
    el("div")
        .class("forum")
        .child(el("h2").text("Foro"))
        .child(el("p").text("Espacio de consultas internas del equipo médico."))
}

fn render_login_modal(gate: GateState) -> Element {
    el("div")
        .attr("id", "login-modal")
        .class("modal")
        .attr("role", "dialog")
        .flag_if(!gate.modal_visible(), "hidden")
        .child(
            el("form")
                .class("login-form")
                .child(el("h2").text("Acceso"))
                .child(
                    el("input")
                        .attr("type", "password")
                        .attr("name", "password")
                        .attr("autocomplete", "current-password"),
                )
                .child(el("p").class("login-error").flag("hidden"))
                .child(el("button").attr("type", "submit").text("Ingresar")),
        )
}
