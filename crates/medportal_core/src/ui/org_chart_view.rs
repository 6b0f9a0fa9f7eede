//! Org chart accordion renderer.

use crate::model::org::{OrgGroup, Region, Sector, Staff};
use crate::ui::accordion::{AccordionState, DisplayMode};
use crate::ui::view::{el, Element, ViewNode};

/// Renders group → region → sector → staff panels for the given state.
///
/// Closed panels render only their header. Sectors always render once their
/// region is open, including empty ones.
pub fn render_org_chart(groups: &[OrgGroup], state: &AccordionState) -> ViewNode {
    let forced = state.mode() == DisplayMode::ForcedOpen;
    let panel_open = state.panel_open();

    let mut panel = el("div")
        .class("org-chart")
        .class_if(forced, "is-forced-open")
        .attr("data-accordion", "org")
        .child(
            el("button")
                .class("org-chart-toggle")
                .attr("type", "button")
                .attr("aria-expanded", panel_open.to_string())
                .text("Estructura organizacional"),
        );
    if panel_open {
        panel = panel.child(
            el("div")
                .class("org-groups")
                .children(groups.iter().map(|group| render_group(group, state))),
        );
    }
    panel.into()
}

fn render_group(group: &OrgGroup, state: &AccordionState) -> Element {
    let open = state.is_group_open(group.id);
    let header = el("button")
        .class("group-header")
        .attr("type", "button")
        .attr("data-group", group.id)
        .attr("aria-expanded", open.to_string())
        .child(el("i").class(format!("icon-{}", group.icon)))
        .child(
            el("span")
                .class("group-titles")
                .child(el("strong").text(group.title))
                .child(el("small").text(group.subtitle)),
        )
        .child(el("span").class("group-leader").text(group.leader))
        .child(
            el("span")
                .class("group-count")
                .text(format!("{} personas", group.staff_count())),
        );

    let mut panel = el("article")
        .class("org-group")
        .class_if(open, "is-open")
        .attr("data-group-id", group.id)
        .child(header);
    if open {
        panel = panel.child(
            el("div")
                .class("group-body")
                .children(group.regions.iter().map(|region| render_region(region, state))),
        );
    }
    panel
}

fn render_region(region: &Region, state: &AccordionState) -> Element {
    let open = state.is_region_open(region.id);
    let mut panel = el("section")
        .class("org-region")
        .class_if(open, "is-open")
        .attr("data-region-id", region.id)
        .child(
            el("button")
                .class("region-header")
                .attr("type", "button")
                .attr("data-region", region.id)
                .attr("aria-expanded", open.to_string())
                .text(region.name),
        );
    if open {
        panel = panel.child(
            el("div")
                .class("region-body")
                .children(region.sectors.iter().map(render_sector)),
        );
    }
    panel
}

fn render_sector(sector: &Sector) -> Element {
    el("div")
        .class("org-sector")
        .child(el("h4").text(sector.name))
        .child(
            el("div")
                .class("sector-staff")
                .class_if(sector.is_empty(), "is-empty")
                .children(sector.staff.iter().map(render_staff)),
        )
}

fn render_staff(staff: &Staff) -> Element {
    let mut badge = el("span")
        .class("staff-badge")
        .class_if(staff.coordinator, "is-coordinator")
        .child(el("span").class("staff-name").text(staff.name));
    if let Some(role) = staff.role {
        badge = badge.child(el("span").class("staff-role").text(role));
    }
    badge
}
