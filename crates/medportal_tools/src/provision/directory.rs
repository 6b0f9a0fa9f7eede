//! Identity/document directory seam.
//!
//! # Responsibility
//! - Define the two calls provisioning needs: create identity, merge profile.
//! - Provide an in-memory directory for dry runs and tests.
//!
//! # Invariants
//! - `merge_profile` only writes fields that are present; absent fields keep
//!   their stored value.
//! - `create_identity` reports a duplicate id as `DirectoryError::AlreadyExists`.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors raised by an account directory backend.
#[derive(Debug)]
pub enum DirectoryError {
    /// An identity with this id is already registered.
    AlreadyExists { uid: String },
    /// The service refused the request for another reason.
    Rejected { status: u16, code: String },
    /// Access token could not be obtained.
    Auth(String),
    Transport(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists { uid } => write!(f, "identity already exists: {uid}"),
            Self::Rejected { status, code } => {
                write!(f, "directory rejected request: status={status} code={code}")
            }
            Self::Auth(message) => write!(f, "directory authentication failed: {message}"),
            Self::Transport(message) => write!(f, "directory transport error: {message}"),
        }
    }
}

impl Error for DirectoryError {}

/// Identity creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRequest {
    pub uid: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Profile document fields. `None` means "leave as stored".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
    pub position: String,
    pub role: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileFields {
    /// Field names carried by this merge, in document order.
    pub fn present_field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["name", "email", "position"];
        if self.role.is_some() {
            names.push("role");
        }
        if self.status.is_some() {
            names.push("status");
        }
        if self.created_at.is_some() {
            names.push("createdAt");
        }
        names.push("updatedAt");
        names
    }
}

/// Identity + profile backend used by the provisioning runner.
pub trait AccountDirectory {
    /// Creates an identity and returns its id.
    fn create_identity(&mut self, request: &IdentityRequest) -> DirectoryResult<String>;
    /// Merges profile fields into the document keyed by `uid`.
    fn merge_profile(&mut self, uid: &str, fields: &ProfileFields) -> DirectoryResult<()>;
}

/// Stored profile in the in-memory directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredProfile {
    pub fields: BTreeMap<String, String>,
}

impl StoredProfile {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// In-memory directory used by `--dry-run` and tests.
#[derive(Debug, Default)]
pub struct MemoryAccountDirectory {
    identities: BTreeMap<String, IdentityRequest>,
    profiles: BTreeMap<String, StoredProfile>,
    failing_emails: Vec<String>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity as if created by an earlier run.
    pub fn with_existing_identity(mut self, request: IdentityRequest) -> Self {
        self.identities.insert(request.uid.clone(), request);
        self
    }

    /// Seeds a stored profile field.
    pub fn with_profile_field(mut self, uid: &str, name: &str, value: &str) -> Self {
        self.profiles
            .entry(uid.to_string())
            .or_default()
            .fields
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Makes identity creation fail with a non-duplicate error for `email`.
    pub fn with_failing_email(mut self, email: &str) -> Self {
        self.failing_emails.push(email.to_string());
        self
    }

    pub fn identity(&self, uid: &str) -> Option<&IdentityRequest> {
        self.identities.get(uid)
    }

    pub fn profile(&self, uid: &str) -> Option<&StoredProfile> {
        self.profiles.get(uid)
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

impl AccountDirectory for MemoryAccountDirectory {
    fn create_identity(&mut self, request: &IdentityRequest) -> DirectoryResult<String> {
        if self.failing_emails.iter().any(|email| email == &request.email) {
            return Err(DirectoryError::Rejected {
                status: 400,
                code: "INVALID_EMAIL".to_string(),
            });
        }
        if self.identities.contains_key(&request.uid) {
            return Err(DirectoryError::AlreadyExists {
                uid: request.uid.clone(),
            });
        }
        self.identities.insert(request.uid.clone(), request.clone());
        Ok(request.uid.clone())
    }

    fn merge_profile(&mut self, uid: &str, fields: &ProfileFields) -> DirectoryResult<()> {
        let profile = self.profiles.entry(uid.to_string()).or_default();
        let mut put = |name: &str, value: String| {
            profile.fields.insert(name.to_string(), value);
        };
        put("name", fields.name.clone());
        put("email", fields.email.clone());
        put("position", fields.position.clone());
        if let Some(role) = &fields.role {
            put("role", role.clone());
        }
        if let Some(status) = &fields.status {
            put("status", status.clone());
        }
        if let Some(created_at) = fields.created_at {
            put("createdAt", created_at.to_rfc3339());
        }
        put("updatedAt", fields.updated_at.to_rfc3339());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountDirectory, DirectoryError, IdentityRequest, MemoryAccountDirectory, ProfileFields};
    use chrono::{TimeZone, Utc};

    fn request(uid: &str) -> IdentityRequest {
        IdentityRequest {
            uid: uid.to_string(),
            email: format!("{uid}@example.org"),
            password: "secret1".to_string(),
            display_name: uid.to_string(),
        }
    }

    #[test]
    fn duplicate_identity_reports_already_exists() {
        let mut directory = MemoryAccountDirectory::new();
        directory.create_identity(&request("a")).unwrap();
        let err = directory.create_identity(&request("a")).unwrap_err();
        assert!(matches!(err, DirectoryError::AlreadyExists { uid } if uid == "a"));
    }

    #[test]
    fn merge_keeps_fields_absent_from_the_update() {
        let mut directory = MemoryAccountDirectory::new().with_profile_field("a", "role", "admin");
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let fields = ProfileFields {
            name: "Ana".to_string(),
            email: "a@example.org".to_string(),
            position: "Enfermera".to_string(),
            role: None,
            status: None,
            created_at: None,
            updated_at: at,
        };
        assert_eq!(
            fields.present_field_names(),
            vec!["name", "email", "position", "updatedAt"]
        );

        directory.merge_profile("a", &fields).unwrap();
        let profile = directory.profile("a").unwrap();
        assert_eq!(profile.get("role"), Some("admin"));
        assert_eq!(profile.get("name"), Some("Ana"));
    }
}
