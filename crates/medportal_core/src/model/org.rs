//! Organizational chart shapes: group → region → sector → staff.

use serde::Serialize;

/// One person listed under a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Staff {
    pub name: &'static str,
    /// Optional role label shown inside the badge.
    pub role: Option<&'static str>,
    /// Styling only: coordinators get a highlighted badge.
    pub coordinator: bool,
}

impl Staff {
    pub const fn member(name: &'static str) -> Self {
        Self {
            name,
            role: None,
            coordinator: false,
        }
    }

    pub const fn with_role(name: &'static str, role: &'static str) -> Self {
        Self {
            name,
            role: Some(role),
            coordinator: false,
        }
    }

    pub const fn coordinator(name: &'static str, role: &'static str) -> Self {
        Self {
            name,
            role: Some(role),
            coordinator: true,
        }
    }
}

/// Leaf container of staff badges. May be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub name: &'static str,
    pub staff: &'static [Staff],
}

impl Sector {
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub sectors: &'static [Sector],
}

/// Top-level accordion panel of the org chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrgGroup {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Leader name or label rendered in the group header.
    pub leader: &'static str,
    /// Icon token consumed by the stylesheet (`icon-<token>`).
    pub icon: &'static str,
    pub regions: &'static [Region],
}

impl OrgGroup {
    /// Looks up one region of this group by id.
    pub fn region(&self, region_id: &str) -> Option<&'static Region> {
        self.regions.iter().find(|region| region.id == region_id)
    }

    /// Total staff entries across all regions and sectors.
    pub fn staff_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|region| region.sectors.iter())
            .map(|sector| sector.staff.len())
            .sum()
    }
}
