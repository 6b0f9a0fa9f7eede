//! One-shot account provisioning.
//!
//! # Responsibility
//! - Create one identity and one profile document per roster entry.
//! - Treat "identifier already exists" as a merge, everything else as skip.
//!
//! # Invariants
//! - Records are processed strictly one at a time, in roster order.
//! - Configuration errors abort before the first record.

pub mod credentials;
pub mod directory;
pub mod rest;
pub mod roster;
pub mod runner;

use crate::provision::directory::DirectoryError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors raised by the provisioning tool.
#[derive(Debug)]
pub enum ProvisionError {
    /// None of the credential environment variables is set.
    MissingCredentialEnv(&'static [&'static str]),
    /// Credential path is set but the file does not exist.
    CredentialFileMissing(PathBuf),
    CredentialRead {
        path: PathBuf,
        source: std::io::Error,
    },
    CredentialParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// National id yields fewer characters than the identity service accepts.
    InvalidNationalId(String),
    Directory(DirectoryError),
}

impl Display for ProvisionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentialEnv(names) => write!(
                f,
                "service account credential not configured; set one of {}",
                names.join(" or ")
            ),
            Self::CredentialFileMissing(path) => {
                write!(f, "service account file not found: {}", path.display())
            }
            Self::CredentialRead { path, source } => write!(
                f,
                "failed to read service account `{}`: {source}",
                path.display()
            ),
            Self::CredentialParse { path, source } => write!(
                f,
                "failed to parse service account `{}`: {source}",
                path.display()
            ),
            Self::InvalidNationalId(masked) => {
                write!(f, "national id too short to derive a password: {masked}")
            }
            Self::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProvisionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CredentialRead { source, .. } => Some(source),
            Self::CredentialParse { source, .. } => Some(source),
            Self::Directory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DirectoryError> for ProvisionError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}
