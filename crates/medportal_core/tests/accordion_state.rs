use medportal_core::ui::org_chart_view::render_org_chart;
use medportal_core::{org_groups, AccordionError, AccordionState, DisplayMode, Layout, ViewNode};

fn expandable() -> AccordionState {
    AccordionState::new(org_groups(), DisplayMode::Expandable)
}

fn open_groups(state: &AccordionState) -> Vec<&str> {
    state
        .groups()
        .iter()
        .filter(|group| group.open)
        .map(|group| group.id.as_str())
        .collect()
}

#[test]
fn starts_fully_closed() {
    let state = expandable();
    assert!(open_groups(&state).is_empty());
    assert!(!state.panel_open());
    assert!(state
        .groups()
        .iter()
        .flat_map(|group| group.regions.iter())
        .all(|region| !region.open));
}

#[test]
fn opening_group_twice_is_idempotent() {
    let once = expandable()
        .set_group_open("norte", true)
        .unwrap()
        .set_region_open("norte-calama", true)
        .unwrap();
    let twice = once.set_group_open("norte", true).unwrap();

    assert_eq!(once, twice);
    assert_eq!(open_groups(&twice), vec!["norte"]);
    assert!(twice.is_region_open("norte-calama"));
}

#[test]
fn opening_another_group_closes_previous_and_its_regions() {
    let state = expandable()
        .set_region_open("direccion-apoyo", true)
        .unwrap();
    assert_eq!(state.open_group_id(), Some("direccion"));

    let state = state.set_group_open("sur", true).unwrap();
    assert_eq!(open_groups(&state), vec!["sur"]);
    assert!(!state.is_region_open("direccion-apoyo"));
    let direccion = state
        .groups()
        .iter()
        .find(|group| group.id == "direccion")
        .unwrap();
    assert!(direccion.regions.iter().all(|region| !region.open));
}

#[test]
fn only_one_region_open_per_group() {
    let state = expandable()
        .set_region_open("norte-antofagasta", true)
        .unwrap()
        .set_region_open("norte-calama", true)
        .unwrap();
    assert!(state.is_region_open("norte-calama"));
    assert!(!state.is_region_open("norte-antofagasta"));
}

#[test]
fn closing_group_closes_its_regions() {
    let state = expandable()
        .set_region_open("sur-concepcion", true)
        .unwrap()
        .set_group_open("sur", false)
        .unwrap();
    assert!(!state.is_group_open("sur"));
    assert!(!state.is_region_open("sur-concepcion"));

    let reopened = state.set_group_open("sur", true).unwrap();
    assert!(!reopened.is_region_open("sur-concepcion"));
}

#[test]
fn click_outside_closes_all_only_in_expandable_mode() {
    let state = expandable().set_group_open("norte", true).unwrap();
    assert!(state.click_outside().open_group_id().is_none());

    let forced = AccordionState::new(org_groups(), DisplayMode::ForcedOpen)
        .set_group_open("norte", true)
        .unwrap();
    assert_eq!(forced.click_outside().open_group_id(), Some("norte"));
    assert_eq!(forced.close_all_groups().open_group_id(), None);
}

#[test]
fn forced_open_panel_never_collapses() {
    let forced = AccordionState::new(org_groups(), DisplayMode::ForcedOpen);
    assert!(forced.panel_open());
    assert!(forced.toggle_panel().panel_open());

    let expandable = expandable();
    let opened = expandable.toggle_panel();
    assert!(opened.panel_open());
    assert!(!opened.toggle_panel().panel_open());
    assert!(opened.with_mode(DisplayMode::ForcedOpen).toggle_panel().panel_open());
}

#[test]
fn unknown_ids_are_rejected() {
    let err = expandable().set_group_open("oeste", true).unwrap_err();
    assert_eq!(err, AccordionError::UnknownGroup("oeste".to_string()));
    let err = expandable().toggle_region("oeste-1").unwrap_err();
    assert_eq!(err, AccordionError::UnknownRegion("oeste-1".to_string()));
}

#[test]
fn render_shows_only_open_branches_and_keeps_empty_sector() {
    let state = expandable()
        .toggle_panel()
        .set_region_open("direccion-apoyo", true)
        .unwrap();
    let tree = render_org_chart(org_groups(), &state);

    let groups = tree.find_by_class("org-group");
    assert_eq!(groups.len(), 3);
    let open: Vec<&str> = groups
        .iter()
        .filter(|group| group.has_class("is-open"))
        .filter_map(|group| group.get_attr("data-group-id"))
        .collect();
    assert_eq!(open, vec!["direccion"]);
    let counts: Vec<String> = tree
        .find_by_class("group-count")
        .into_iter()
        .map(|count| ViewNode::from(count.clone()).text_content())
        .collect();
    assert_eq!(counts, vec!["5 personas", "6 personas", "4 personas"]);

    assert_eq!(tree.find_by_class("region-body").len(), 1);
    let empty = tree.find_by_class("is-empty");
    assert_eq!(empty.len(), 1);
    assert!(empty[0].child_nodes().is_empty());

    let coordinator = tree.find_by_class("is-coordinator");
    assert_eq!(coordinator.len(), 1);
    assert!(ViewNode::from(coordinator[0].clone())
        .text_content()
        .contains("Andrea Salinas"));
}

#[test]
fn opening_a_group_on_desktop_expands_the_panel() {
    let state = AccordionState::new(org_groups(), Layout::Desktop.accordion_mode())
        .set_group_open("norte", true)
        .unwrap();
    assert!(state.panel_open());

    let tree = render_org_chart(org_groups(), &state);
    let open: Vec<&str> = tree
        .find_by_class("org-group")
        .into_iter()
        .filter(|group| group.has_class("is-open"))
        .filter_map(|group| group.get_attr("data-group-id"))
        .collect();
    assert_eq!(open, vec!["norte"]);
    let toggle = tree.find_by_class("org-chart-toggle");
    assert_eq!(toggle[0].get_attr("aria-expanded"), Some("true"));
}

#[test]
fn reopening_region_after_panel_collapse_expands_it_again() {
    let state = expandable()
        .set_region_open("sur-concepcion", true)
        .unwrap()
        .toggle_panel();
    assert!(!state.panel_open());

    let state = state.set_region_open("sur-concepcion", true).unwrap();
    assert!(state.panel_open());
    assert!(state.is_region_open("sur-concepcion"));
    assert_eq!(
        render_org_chart(org_groups(), &state)
            .find_by_class("region-body")
            .len(),
        1
    );
}

#[test]
fn closed_panel_renders_only_toggle() {
    let tree = render_org_chart(org_groups(), &expandable());
    assert!(tree.find_by_class("org-group").is_empty());
    let toggle = tree.find_by_class("org-chart-toggle");
    assert_eq!(toggle[0].get_attr("aria-expanded"), Some("false"));
}
