//! View/route shell: fragment routing, layout, side menu and bottom nav.
//!
//! # Invariants
//! - Every fragment resolves to one of four canonical views.
//! - Unknown or empty fragments resolve to `View::Carrete`.
//! - In compact layout exactly one section is visible.

use crate::ui::accordion::DisplayMode;
use log::debug;

/// Viewport width (px) at or below which the compact layout applies.
pub const COMPACT_MAX_WIDTH: u32 = 768;

/// Canonical top-level sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Carrete,
    Estructura,
    Comites,
    Foro,
}

impl View {
    pub const ALL: [View; 4] = [View::Carrete, View::Estructura, View::Comites, View::Foro];

    /// Canonical fragment, without `#`.
    pub fn fragment(self) -> &'static str {
        match self {
            Self::Carrete => "carrete",
            Self::Estructura => "estructura",
            Self::Comites => "comites",
            Self::Foro => "foro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Carrete => "Inicio",
            Self::Estructura => "Estructura",
            Self::Comites => "Comités",
            Self::Foro => "Foro",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Carrete => "home",
            Self::Estructura => "sitemap",
            Self::Comites => "users",
            Self::Foro => "chat",
        }
    }

    fn from_alias(alias: &str) -> Option<Self> {
        let view = match alias {
            "carrete" | "inicio" | "home" | "novedades" => Self::Carrete,
            "estructura" | "organigrama" | "equipo" | "structure" => Self::Estructura,
            "comites" | "comités" | "comite" | "comité" | "committees" => Self::Comites,
            "foro" | "forum" | "consultas" => Self::Foro,
            _ => return None,
        };
        Some(view)
    }
}

/// Outcome of resolving a URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteResolution {
    pub view: View,
    /// `true` when the location should be rewritten to `#<canonical>`.
    pub rewrite: bool,
}

/// Resolves a fragment (with or without `#`), case-insensitively.
pub fn resolve_fragment(fragment: &str) -> RouteResolution {
    let raw = fragment.trim().trim_start_matches('#').trim();
    let normalized = raw.to_lowercase();
    match View::from_alias(&normalized) {
        Some(view) => RouteResolution {
            view,
            rewrite: raw != view.fragment(),
        },
        None => RouteResolution {
            view: View::Carrete,
            rewrite: !raw.is_empty(),
        },
    }
}

/// Page layout derived from viewport and display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Wide viewport in a browser tab: all sections stacked.
    Desktop,
    /// Narrow viewport or installed standalone app: one section at a time.
    Compact,
}

impl Layout {
    pub fn detect(viewport_width: u32, standalone: bool) -> Self {
        if standalone || viewport_width <= COMPACT_MAX_WIDTH {
            Self::Compact
        } else {
            Self::Desktop
        }
    }

    /// Accordion mode tied to this layout.
    pub fn accordion_mode(self) -> DisplayMode {
        match self {
            Self::Desktop => DisplayMode::Expandable,
            Self::Compact => DisplayMode::ForcedOpen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub view: View,
    pub active: bool,
}

/// Shell state: active view, layout and side-menu flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellState {
    view: View,
    layout: Layout,
    menu_open: bool,
}

impl ShellState {
    pub fn new(fragment: &str, layout: Layout) -> Self {
        Self {
            view: resolve_fragment(fragment).view,
            layout,
            menu_open: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Handles a hash change. Navigating always closes the side menu.
    pub fn navigate(&self, fragment: &str) -> (Self, RouteResolution) {
        let resolution = resolve_fragment(fragment);
        debug!(
            "event=shell_navigate module=ui status=ok view={} rewrite={}",
            resolution.view.fragment(),
            resolution.rewrite
        );
        let next = Self {
            view: resolution.view,
            layout: self.layout,
            menu_open: false,
        };
        (next, resolution)
    }

    pub fn with_layout(&self, layout: Layout) -> Self {
        Self { layout, ..*self }
    }

    pub fn toggle_menu(&self) -> Self {
        Self {
            menu_open: !self.menu_open,
            ..*self
        }
    }

    pub fn close_menu(&self) -> Self {
        Self {
            menu_open: false,
            ..*self
        }
    }

    pub fn is_section_visible(&self, view: View) -> bool {
        match self.layout {
            Layout::Desktop => true,
            Layout::Compact => view == self.view,
        }
    }

    /// Bottom navigation, shown only in compact layout.
    pub fn bottom_nav(&self) -> Vec<NavItem> {
        if self.layout == Layout::Desktop {
            return Vec::new();
        }
        View::ALL
            .into_iter()
            .map(|view| NavItem {
                view,
                active: view == self.view,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_fragment, Layout, ShellState, View};

    #[test]
    fn aliases_resolve_case_insensitively_and_request_rewrite() {
        let resolution = resolve_fragment("#Organigrama");
        assert_eq!(resolution.view, View::Estructura);
        assert!(resolution.rewrite);

        let canonical = resolve_fragment("#foro");
        assert_eq!(canonical.view, View::Foro);
        assert!(!canonical.rewrite);

        let upper = resolve_fragment("COMITES");
        assert_eq!(upper.view, View::Comites);
        assert!(upper.rewrite);
    }

    #[test]
    fn unknown_and_empty_fragments_default_to_carrete() {
        assert_eq!(resolve_fragment("").view, View::Carrete);
        assert!(!resolve_fragment("").rewrite);
        let unknown = resolve_fragment("#nada");
        assert_eq!(unknown.view, View::Carrete);
        assert!(unknown.rewrite);
    }

    #[test]
    fn compact_layout_shows_one_section_and_marks_active_nav() {
        let shell = ShellState::new("#comites", Layout::detect(390, false));
        assert!(shell.is_section_visible(View::Comites));
        assert!(!shell.is_section_visible(View::Foro));
        let active: Vec<View> = shell
            .bottom_nav()
            .into_iter()
            .filter(|item| item.active)
            .map(|item| item.view)
            .collect();
        assert_eq!(active, vec![View::Comites]);
    }

    #[test]
    fn navigation_closes_menu() {
        let shell = ShellState::new("", Layout::Desktop).toggle_menu();
        assert!(shell.menu_open());
        let (next, _) = shell.navigate("#foro");
        assert!(!next.menu_open());
        assert_eq!(next.view(), View::Foro);
        assert!(next.bottom_nav().is_empty());
    }

    #[test]
    fn standalone_mode_is_compact_regardless_of_width() {
        assert_eq!(Layout::detect(1920, true), Layout::Compact);
        assert_eq!(Layout::detect(1920, false), Layout::Desktop);
    }
}
