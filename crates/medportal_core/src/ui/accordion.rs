//! Expand/collapse state machine for the org chart accordion.
//!
//! # Responsibility
//! - Track open/closed flags for groups and their regions.
//! - Enforce sibling exclusivity at both levels.
//!
//! # Invariants
//! - At most one group is open.
//! - At most one region is open per group, and only inside an open group.
//! - A closed group has all of its regions closed.
//! - Transitions return a new state; applying the same target twice is a no-op.
//! - In `ForcedOpen` mode the outer panel never collapses.
//! - An open group or region implies an expanded outer panel when set.

use crate::model::org::OrgGroup;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How the outer panel behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Desktop: the panel toggles and outside clicks close all groups.
    Expandable,
    /// Small viewport or standalone app: the panel always stays open.
    ForcedOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccordionError {
    UnknownGroup(String),
    UnknownRegion(String),
}

impl Display for AccordionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGroup(id) => write!(f, "org group not found: {id}"),
            Self::UnknownRegion(id) => write!(f, "org region not found: {id}"),
        }
    }
}

impl Error for AccordionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionState {
    pub id: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupState {
    pub id: String,
    pub open: bool,
    pub regions: Vec<RegionState>,
}

impl GroupState {
    fn close(&mut self) {
        self.open = false;
        for region in &mut self.regions {
            region.open = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionState {
    mode: DisplayMode,
    panel_open: bool,
    groups: Vec<GroupState>,
}

impl AccordionState {
    /// Everything closed; the panel starts open only in `ForcedOpen` mode.
    pub fn new(groups: &[OrgGroup], mode: DisplayMode) -> Self {
        let groups = groups
            .iter()
            .map(|group| GroupState {
                id: group.id.to_string(),
                open: false,
                regions: group
                    .regions
                    .iter()
                    .map(|region| RegionState {
                        id: region.id.to_string(),
                        open: false,
                    })
                    .collect(),
            })
            .collect();
        Self {
            mode,
            panel_open: mode == DisplayMode::ForcedOpen,
            groups,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn groups(&self) -> &[GroupState] {
        &self.groups
    }

    pub fn open_group_id(&self) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.open)
            .map(|group| group.id.as_str())
    }

    pub fn is_group_open(&self, group_id: &str) -> bool {
        self.group(group_id).is_some_and(|group| group.open)
    }

    pub fn is_region_open(&self, region_id: &str) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.regions.iter())
            .any(|region| region.id == region_id && region.open)
    }

    /// Switches display mode; entering `ForcedOpen` opens the panel.
    pub fn with_mode(&self, mode: DisplayMode) -> Self {
        let mut next = self.clone();
        next.mode = mode;
        if mode == DisplayMode::ForcedOpen {
            next.panel_open = true;
        }
        next
    }

    /// Toggles the outer panel. In `ForcedOpen` mode it can only open.
    pub fn toggle_panel(&self) -> Self {
        let mut next = self.clone();
        next.panel_open = match self.mode {
            DisplayMode::Expandable => !self.panel_open,
            DisplayMode::ForcedOpen => true,
        };
        next
    }

    /// Opens or closes one group.
    ///
    /// Opening closes every other group and their regions and expands the
    /// outer panel; closing forces the group's own regions closed.
    pub fn set_group_open(&self, group_id: &str, open: bool) -> Result<Self, AccordionError> {
        let current = self
            .group(group_id)
            .ok_or_else(|| AccordionError::UnknownGroup(group_id.to_string()))?;
        if current.open == open && (!open || self.panel_open) {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        if open {
            next.panel_open = true;
        }
        for group in &mut next.groups {
            if group.id == group_id {
                if open {
                    group.open = true;
                } else {
                    group.close();
                }
            } else if open {
                group.close();
            }
        }
        debug!(
            "event=accordion_group module=ui status=ok group={} open={}",
            group_id, open
        );
        Ok(next)
    }

    pub fn toggle_group(&self, group_id: &str) -> Result<Self, AccordionError> {
        let open = self.is_group_open(group_id);
        self.set_group_open(group_id, !open)
    }

    /// Opens or closes one region.
    ///
    /// Opening a region inside a closed group opens that group first.
    pub fn set_region_open(&self, region_id: &str, open: bool) -> Result<Self, AccordionError> {
        let owner = self
            .groups
            .iter()
            .find(|group| group.regions.iter().any(|region| region.id == region_id))
            .ok_or_else(|| AccordionError::UnknownRegion(region_id.to_string()))?;
        if self.is_region_open(region_id) == open && (!open || self.panel_open) {
            return Ok(self.clone());
        }

        let owner_id = owner.id.clone();
        let mut next = if open {
            self.set_group_open(&owner_id, true)?
        } else {
            self.clone()
        };
        if let Some(group) = next.groups.iter_mut().find(|group| group.id == owner_id) {
            for region in &mut group.regions {
                if region.id == region_id {
                    region.open = open;
                } else if open {
                    region.open = false;
                }
            }
        }
        debug!(
            "event=accordion_region module=ui status=ok region={} open={}",
            region_id, open
        );
        Ok(next)
    }

    pub fn toggle_region(&self, region_id: &str) -> Result<Self, AccordionError> {
        let open = self.is_region_open(region_id);
        self.set_region_open(region_id, !open)
    }

    pub fn close_all_groups(&self) -> Self {
        let mut next = self.clone();
        for group in &mut next.groups {
            group.close();
        }
        next
    }

    /// Click outside the active panel: closes all groups in `Expandable`
    /// mode, no-op in `ForcedOpen` mode.
    pub fn click_outside(&self) -> Self {
        match self.mode {
            DisplayMode::Expandable => self.close_all_groups(),
            DisplayMode::ForcedOpen => self.clone(),
        }
    }

    fn group(&self, group_id: &str) -> Option<&GroupState> {
        self.groups.iter().find(|group| group.id == group_id)
    }
}
