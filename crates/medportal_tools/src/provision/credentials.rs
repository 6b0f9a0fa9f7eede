//! Service account credential loading.

use crate::provision::ProvisionError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variables checked, in order, for the credential path.
pub const CREDENTIAL_ENV_VARS: &[&str] = &["GOOGLE_APPLICATION_CREDENTIALS", "FIREBASE_SERVICE_ACCOUNT"];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Fields used from a service account JSON key.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> Result<Self, ProvisionError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProvisionError::CredentialRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ProvisionError::CredentialParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves the credential path from the first non-blank variable.
///
/// Fails when no variable is set or the file does not exist.
pub fn credential_path_from_env<F>(lookup: F) -> Result<PathBuf, ProvisionError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = CREDENTIAL_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(ProvisionError::MissingCredentialEnv(CREDENTIAL_ENV_VARS))?;

    if !path.is_file() {
        return Err(ProvisionError::CredentialFileMissing(path));
    }
    Ok(path)
}
