//! Project slot assignment for committee topics.
//!
//! # Invariants
//! - Output keeps input order and length; every topic carries a slot.
//! - Existing positive slots are preserved unchanged.
//! - New slots never repeat a used slot within `[1, max_slots]`.
//! - Past `max_slots` slots keep counting up (soft cap, never an error).

use crate::model::committee::CommitteeCatalog;
use crate::model::topic::Topic;
use log::debug;
use std::collections::BTreeSet;

/// Returns `topics` with every `project_number` filled.
pub fn assign_project_slots(
    topics: &[Topic],
    catalog: &CommitteeCatalog,
    committee_id: &str,
) -> Vec<Topic> {
    let max_slots = catalog.max_slots(committee_id);
    let mut used = used_slots(topics, max_slots);
    let mut cursor = 1_u32;
    let mut assigned_count = 0_usize;

    let assigned = topics
        .iter()
        .map(|topic| {
            if topic.project_number.is_some() {
                return topic.clone();
            }
            while used.contains(&cursor) {
                cursor += 1;
            }
            used.insert(cursor);
            assigned_count += 1;
            topic.clone().with_slot(cursor)
        })
        .collect();

    debug!(
        "event=slots_assign module=slots status=ok committee={} max_slots={} topics={} assigned={} overflow={}",
        committee_id,
        max_slots,
        topics.len(),
        assigned_count,
        cursor > max_slots
    );
    assigned
}

/// Smallest unused slot in `[1, max_slots]`, else `topics.len() + 1`.
pub fn next_free_slot(topics: &[Topic], catalog: &CommitteeCatalog, committee_id: &str) -> u32 {
    let max_slots = catalog.max_slots(committee_id);
    let used = used_slots(topics, max_slots);
    (1..=max_slots)
        .find(|slot| !used.contains(slot))
        .unwrap_or_else(|| u32::try_from(topics.len()).unwrap_or(u32::MAX).saturating_add(1))
}

fn used_slots(topics: &[Topic], max_slots: u32) -> BTreeSet<u32> {
    topics
        .iter()
        .filter_map(|topic| topic.project_number)
        .filter(|slot| (1..=max_slots).contains(slot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{assign_project_slots, next_free_slot};
    use crate::data::builtin_catalog;
    use crate::model::topic::Topic;

    fn slots(topics: &[Topic]) -> Vec<u32> {
        topics
            .iter()
            .map(|topic| topic.project_number.unwrap())
            .collect()
    }

    #[test]
    fn fills_gaps_from_one_skipping_used() {
        let topics = vec![
            Topic::new("1", "a").with_slot(2),
            Topic::new("2", "b"),
            Topic::new("3", "c"),
        ];
        let out = assign_project_slots(&topics, &builtin_catalog(), "calidad");
        assert_eq!(slots(&out), vec![2, 1, 3]);
    }

    #[test]
    fn overflow_keeps_counting_past_max() {
        let topics: Vec<Topic> = (0..5).map(|i| Topic::new(i.to_string(), "")).collect();
        let out = assign_project_slots(&topics, &builtin_catalog(), "farmacia");
        assert_eq!(slots(&out), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn next_free_slot_prefers_gap_then_count_plus_one() {
        let catalog = builtin_catalog();
        let topics = vec![Topic::new("a", "").with_slot(1), Topic::new("b", "").with_slot(3)];
        assert_eq!(next_free_slot(&topics, &catalog, "farmacia"), 2);

        let full: Vec<Topic> = (1..=3).map(|i| Topic::new(i.to_string(), "").with_slot(i)).collect();
        assert_eq!(next_free_slot(&full, &catalog, "farmacia"), 4);
        assert_eq!(next_free_slot(&[], &catalog, "desconocido"), 1);
    }
}
