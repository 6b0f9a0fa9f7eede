//! Rendering layer: typed view tree, accordion state and page assembly.

pub mod accordion;
pub mod dashboard_view;
pub mod org_chart_view;
pub mod page;
pub mod shell;
pub mod view;
