//! REST account directory backed by a service account.
//!
//! # Responsibility
//! - Exchange a signed RS256 assertion for an OAuth access token.
//! - Create identities through Identity Toolkit and merge profile documents
//!   through a Firestore field-masked PATCH.
//!
//! # Invariants
//! - One blocking request at a time.
//! - `DUPLICATE_LOCAL_ID` maps to `DirectoryError::AlreadyExists`.

use crate::provision::credentials::ServiceAccount;
use crate::provision::directory::{
    AccountDirectory, DirectoryError, DirectoryResult, IdentityRequest, ProfileFields,
};
use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::{Duration, Instant};

const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PROFILE_COLLECTION: &str = "users";
const TOKEN_SCOPES: &str =
    "https://www.googleapis.com/auth/identitytoolkit https://www.googleapis.com/auth/datastore";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct CreateAccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

pub struct RestAccountDirectory {
    client: Client,
    account: ServiceAccount,
    identity_base: String,
    firestore_base: String,
    token: Option<CachedToken>,
}

impl RestAccountDirectory {
    pub fn new(account: ServiceAccount) -> DirectoryResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            account,
            identity_base: IDENTITY_BASE_URL.to_string(),
            firestore_base: FIRESTORE_BASE_URL.to_string(),
            token: None,
        })
    }

    /// Points both APIs at other base URLs (local emulators).
    pub fn with_endpoints(mut self, identity_base: &str, firestore_base: &str) -> Self {
        self.identity_base = identity_base.trim_end_matches('/').to_string();
        self.firestore_base = firestore_base.trim_end_matches('/').to_string();
        self
    }

    fn access_token(&mut self) -> DirectoryResult<String> {
        if let Some(token) = &self.token {
            if Instant::now() + TOKEN_REFRESH_MARGIN < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: TOKEN_SCOPES,
            aud: &self.account.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .map_err(|err| DirectoryError::Auth(format!("invalid private key: {err}")))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|err| DirectoryError::Auth(format!("failed to sign assertion: {err}")))?;

        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(DirectoryError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }
        let token: TokenResponse = response
            .json()
            .map_err(|err| DirectoryError::Auth(format!("malformed token response: {err}")))?;

        let lifetime = token
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(TOKEN_LIFETIME_SECS as u64));
        debug!("event=token_refresh module=tools status=ok lifetime_secs={}", lifetime.as_secs());
        self.token = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn profile_url(&self, uid: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.firestore_base, self.account.project_id, PROFILE_COLLECTION, uid
        )
    }
}

impl AccountDirectory for RestAccountDirectory {
    fn create_identity(&mut self, request: &IdentityRequest) -> DirectoryResult<String> {
        let token = self.access_token()?;
        let url = format!(
            "{}/projects/{}/accounts",
            self.identity_base, self.account.project_id
        );
        let body = json!({
            "localId": request.uid,
            "email": request.email,
            "password": request.password,
            "displayName": request.display_name,
            "emailVerified": false,
        });
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response, &request.uid));
        }
        let created: CreateAccountResponse = response
            .json()
            .map_err(|err| DirectoryError::Transport(format!("malformed create response: {err}")))?;
        Ok(created.local_id)
    }

    fn merge_profile(&mut self, uid: &str, fields: &ProfileFields) -> DirectoryResult<()> {
        let token = self.access_token()?;
        let mask: Vec<(&str, &str)> = fields
            .present_field_names()
            .into_iter()
            .map(|name| ("updateMask.fieldPaths", name))
            .collect();
        let response = self
            .client
            .patch(self.profile_url(uid))
            .bearer_auth(token)
            .query(&mask)
            .json(&json!({ "fields": document_fields(fields) }))
            .send()
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response, uid));
        }
        Ok(())
    }
}

fn rejection(response: Response, uid: &str) -> DirectoryError {
    let status = response.status().as_u16();
    let code = response
        .json::<ErrorEnvelope>()
        .map(|envelope| {
            let message = envelope.error.message;
            if message.is_empty() {
                envelope.error.status.unwrap_or_default()
            } else {
                message
            }
        })
        .unwrap_or_default();
    // Identity Toolkit appends detail after " : ".
    let code = code.split(" : ").next().unwrap_or_default().trim().to_string();

    if code == "DUPLICATE_LOCAL_ID" {
        DirectoryError::AlreadyExists {
            uid: uid.to_string(),
        }
    } else {
        DirectoryError::Rejected { status, code }
    }
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn timestamp_value(value: DateTime<Utc>) -> Value {
    json!({ "timestampValue": value.to_rfc3339_opts(SecondsFormat::Millis, true) })
}

/// Firestore typed-value map for the present fields.
fn document_fields(fields: &ProfileFields) -> Map<String, Value> {
    let mut document = Map::new();
    document.insert("name".to_string(), string_value(&fields.name));
    document.insert("email".to_string(), string_value(&fields.email));
    document.insert("position".to_string(), string_value(&fields.position));
    if let Some(role) = &fields.role {
        document.insert("role".to_string(), string_value(role));
    }
    if let Some(status) = &fields.status {
        document.insert("status".to_string(), string_value(status));
    }
    if let Some(created_at) = fields.created_at {
        document.insert("createdAt".to_string(), timestamp_value(created_at));
    }
    document.insert("updatedAt".to_string(), timestamp_value(fields.updated_at));
    document
}
