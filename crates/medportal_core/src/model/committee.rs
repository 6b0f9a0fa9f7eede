//! Committee document links indexed by project slot.
//!
//! # Invariants
//! - Unknown committee or slot yields empty links, never an error.
//! - Committees without an explicit slot count use `DEFAULT_MAX_SLOTS`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Slot count used when a committee declares none.
pub const DEFAULT_MAX_SLOTS: u32 = 5;

/// External document links attached to one project slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentLinks {
    pub folder: &'static str,
    pub doc: &'static str,
    pub ppt: &'static str,
}

impl DocumentLinks {
    pub fn is_empty(&self) -> bool {
        self.folder.is_empty() && self.doc.is_empty() && self.ppt.is_empty()
    }
}

/// Static configuration for one committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Committee {
    pub id: &'static str,
    pub name: &'static str,
    /// Declared slot count; `None` falls back to `DEFAULT_MAX_SLOTS`.
    pub max_slots: Option<u32>,
    pub slots: &'static [(u32, DocumentLinks)],
}

/// Committee table plus runtime slot-count overrides.
#[derive(Debug, Clone)]
pub struct CommitteeCatalog {
    committees: &'static [Committee],
    slot_overrides: BTreeMap<String, u32>,
}

impl CommitteeCatalog {
    pub fn new(committees: &'static [Committee]) -> Self {
        Self {
            committees,
            slot_overrides: BTreeMap::new(),
        }
    }

    /// Applies slot-count overrides; zero values are ignored.
    pub fn with_slot_overrides(mut self, overrides: &BTreeMap<String, u32>) -> Self {
        for (committee_id, slots) in overrides {
            if *slots > 0 {
                self.slot_overrides
                    .insert(committee_id.trim().to_string(), *slots);
            }
        }
        self
    }

    pub fn committees(&self) -> &'static [Committee] {
        self.committees
    }

    pub fn committee(&self, committee_id: &str) -> Option<&'static Committee> {
        self.committees
            .iter()
            .find(|committee| committee.id == committee_id)
    }

    /// Configured slot count for `committee_id`.
    pub fn max_slots(&self, committee_id: &str) -> u32 {
        if let Some(slots) = self.slot_overrides.get(committee_id) {
            return *slots;
        }
        self.committee(committee_id)
            .and_then(|committee| committee.max_slots)
            .unwrap_or(DEFAULT_MAX_SLOTS)
    }

    /// Links for one slot; empty when committee or slot is unknown.
    pub fn project_links(&self, committee_id: &str, slot: u32) -> DocumentLinks {
        self.committee(committee_id)
            .and_then(|committee| {
                committee
                    .slots
                    .iter()
                    .find(|(candidate, _)| *candidate == slot)
            })
            .map(|(_, links)| *links)
            .unwrap_or_default()
    }

    pub fn folder_url(&self, committee_id: &str, slot: u32) -> &'static str {
        self.project_links(committee_id, slot).folder
    }

    pub fn doc_url(&self, committee_id: &str, slot: u32) -> &'static str {
        self.project_links(committee_id, slot).doc
    }

    pub fn ppt_url(&self, committee_id: &str, slot: u32) -> &'static str {
        self.project_links(committee_id, slot).ppt
    }
}
