//! Sequential roster provisioning.

use crate::provision::directory::{AccountDirectory, DirectoryError, IdentityRequest, ProfileFields};
use crate::provision::roster::PersonRecord;
use crate::provision::ProvisionError;
use chrono::{DateTime, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

const MIN_PASSWORD_CHARS: usize = 6;
const DEFAULT_ROLE: &str = "user";
const DEFAULT_STATUS: &str = "active";

/// Namespace for account ids derived from emails.
const ACCOUNT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4c3a_9e51_0d2f_8a63_b714);

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z]").expect("valid regex"));

/// Result for one roster entry.
#[derive(Debug)]
pub enum RecordOutcome {
    /// Identity created and full profile written.
    Created { uid: String },
    /// Identity existed; profile merged without role/status.
    Merged { uid: String },
    Failed {
        email: &'static str,
        error: ProvisionError,
    },
}

impl RecordOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Deterministic account id for an email (case and surrounding space ignored).
pub fn account_uid(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    Uuid::new_v5(&ACCOUNT_NAMESPACE, normalized.as_bytes())
        .simple()
        .to_string()
}

/// Initial password: national id without punctuation, verifier letter uppercased.
///
/// # Errors
/// - Returns `InvalidNationalId` when fewer than six characters remain.
pub fn derive_password(national_id: &str) -> Result<String, ProvisionError> {
    let password = NON_ALNUM.replace_all(national_id, "").to_uppercase();
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ProvisionError::InvalidNationalId(mask(national_id)));
    }
    Ok(password)
}

fn mask(value: &str) -> String {
    let visible: String = value.chars().rev().take(2).collect::<Vec<_>>().into_iter().rev().collect();
    format!("***{visible}")
}

/// Provisions every roster entry in order. Never aborts on a record error.
pub fn provision_roster<D>(
    directory: &mut D,
    roster: &[PersonRecord],
    now: DateTime<Utc>,
) -> Vec<RecordOutcome>
where
    D: AccountDirectory + ?Sized,
{
    let mut outcomes = Vec::with_capacity(roster.len());
    for person in roster {
        let outcome = match provision_one(directory, person, now) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    "event=provision_record module=tools status=error email={} error={}",
                    person.email, error
                );
                RecordOutcome::Failed {
                    email: person.email,
                    error,
                }
            }
        };
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
    info!(
        "event=provision_run module=tools status=ok total={} failed={}",
        outcomes.len(),
        failed
    );
    outcomes
}

fn provision_one<D>(
    directory: &mut D,
    person: &PersonRecord,
    now: DateTime<Utc>,
) -> Result<RecordOutcome, ProvisionError>
where
    D: AccountDirectory + ?Sized,
{
    let request = IdentityRequest {
        uid: account_uid(person.email),
        email: person.email.to_string(),
        password: derive_password(person.national_id)?,
        display_name: person.full_name.to_string(),
    };

    match directory.create_identity(&request) {
        Ok(uid) => {
            directory.merge_profile(&uid, &full_profile(person, now))?;
            info!(
                "event=provision_record module=tools status=created email={} uid={}",
                person.email, uid
            );
            Ok(RecordOutcome::Created { uid })
        }
        Err(DirectoryError::AlreadyExists { uid }) => {
            directory.merge_profile(&uid, &update_profile(person, now))?;
            info!(
                "event=provision_record module=tools status=merged email={} uid={}",
                person.email, uid
            );
            Ok(RecordOutcome::Merged { uid })
        }
        Err(err) => Err(err.into()),
    }
}

fn full_profile(person: &PersonRecord, now: DateTime<Utc>) -> ProfileFields {
    ProfileFields {
        role: Some(DEFAULT_ROLE.to_string()),
        status: Some(DEFAULT_STATUS.to_string()),
        created_at: Some(now),
        ..update_profile(person, now)
    }
}

fn update_profile(person: &PersonRecord, now: DateTime<Utc>) -> ProfileFields {
    ProfileFields {
        name: person.full_name.to_string(),
        email: person.email.to_string(),
        position: person.position.to_string(),
        role: None,
        status: None,
        created_at: None,
        updated_at: now,
    }
}
