use medportal_core::ui::page::{render_page, PageModel};
use medportal_core::{
    builtin_catalog, org_groups, AccordionState, DashboardService, GateState, Layout,
    MemoryKeyValueStore, ShellState,
};

fn render(fragment: &str, layout: Layout, gate: GateState) -> String {
    let shell = ShellState::new(fragment, layout);
    let accordion = AccordionState::new(org_groups(), layout.accordion_mode());
    let dashboard = DashboardService::load(MemoryKeyValueStore::new());
    render_page(PageModel {
        shell: &shell,
        accordion: &accordion,
        groups: org_groups(),
        catalog: &builtin_catalog(),
        dashboard: dashboard.render(),
        gate,
    })
}

#[test]
fn compact_layout_hides_inactive_sections_and_shows_bottom_nav() {
    let html = render("#organigrama", Layout::Compact, GateState::Authenticated);
    assert!(html.starts_with("<!DOCTYPE html><html lang=\"es\">"));
    assert!(html.contains("<section class=\"page-section is-active\" id=\"estructura\">"));
    assert!(html.contains("<section class=\"page-section\" id=\"foro\" hidden>"));
    assert!(html.contains("class=\"bottom-nav-item is-active\" href=\"#estructura\""));
    assert!(html.contains("org-chart is-forced-open"));
    assert!(html.contains("<div class=\"modal\" id=\"login-modal\" role=\"dialog\" hidden>"));
}

#[test]
fn desktop_layout_shows_everything_without_bottom_nav() {
    let html = render("", Layout::Desktop, GateState::LoginRequired);
    for fragment in ["carrete", "estructura", "comites", "foro"] {
        assert!(!html.contains(&format!("id=\"{fragment}\" hidden")));
    }
    assert!(html.contains("id=\"progress-dashboard\" hidden"));
    assert!(!html.contains("bottom-nav"));
    assert!(html.contains("<div class=\"modal\" id=\"login-modal\" role=\"dialog\">"));
    assert!(html.contains("data-committee=\"farmacia\""));
    assert!(html.contains("Proyecto 5"));
}
