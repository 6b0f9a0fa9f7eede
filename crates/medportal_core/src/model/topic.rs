//! Committee topics consumed by the slot assignment helper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Legacy field names that carried the project slot, in precedence order.
const LEGACY_SLOT_FIELDS: [&str; 3] = ["projectNumber", "projectSlot", "slot"];

/// One committee topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Project slot (`1..`); `None` means not assigned yet.
    #[serde(default)]
    pub project_number: Option<u32>,
}

impl Topic {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            project_number: None,
        }
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.project_number = Some(slot);
        self
    }

    /// Reads a topic from legacy JSON where the slot may live under
    /// `projectNumber`, `projectSlot` or `slot`.
    ///
    /// The first non-null field wins; a non-positive or non-numeric value
    /// leaves the topic unassigned.
    pub fn from_legacy_json(value: &Value) -> Self {
        let id = value.get("id").map(scalar_to_string).unwrap_or_default();
        let title = value
            .get("title")
            .or_else(|| value.get("name"))
            .map(scalar_to_string)
            .unwrap_or_default();
        let project_number = LEGACY_SLOT_FIELDS
            .iter()
            .filter_map(|field| value.get(*field))
            .find(|raw| !raw.is_null())
            .and_then(normalize_slot_value);

        Self {
            id,
            title,
            project_number,
        }
    }
}

/// Normalizes a raw slot value to a positive integer.
pub fn normalize_slot_value(raw: &Value) -> Option<u32> {
    let number = match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }?;
    u32::try_from(number).ok().filter(|slot| *slot > 0)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
