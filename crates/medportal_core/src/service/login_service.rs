//! Password gate for the portal.
//!
//! This is a convenience gate, not a security boundary: the secrets are
//! plain configuration strings compared in process.
//!
//! # Invariants
//! - With no configured secret the gate is bypassed and the session flag set.
//! - Comparison is case-sensitive against trimmed secrets.
//! - Rejections never lock out or rate limit.

use crate::config::LoginConfig;
use crate::repo::kv_store::KeyValueStore;
use log::{info, warn};

/// Session storage key of the login flag.
pub const SESSION_FLAG_KEY: &str = "isLoggedIn";
const SESSION_FLAG_VALUE: &str = "true";

/// Gate state resolved on page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Session flag already present.
    Authenticated,
    /// No secret configured; flag set without asking.
    Bypassed,
    /// Modal must be shown.
    LoginRequired,
}

impl GateState {
    pub fn modal_visible(self) -> bool {
        matches!(self, Self::LoginRequired)
    }
}

/// Result of one password submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Bypassed,
    Granted,
    /// Empty input; blocked before comparison.
    EmptyPassword { hint: &'static str },
    /// Wrong password; the UI shows `message` and plays the shake cue.
    Rejected { message: &'static str, shake: bool },
}

impl LoginOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Bypassed | Self::Granted)
    }

    pub fn modal_visible(&self) -> bool {
        !self.is_authenticated()
    }
}

/// Compares submitted passwords against up to two secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGate {
    secrets: Vec<String>,
}

impl LoginGate {
    /// Blank secrets are treated as not configured.
    pub fn new(primary: Option<&str>, secondary: Option<&str>) -> Self {
        let secrets = [primary, secondary]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
            .map(str::to_string)
            .collect();
        Self { secrets }
    }

    pub fn from_config(config: &LoginConfig) -> Self {
        Self::new(
            config.primary_secret.as_deref(),
            config.secondary_secret.as_deref(),
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.secrets.is_empty()
    }

    /// Resolves the gate when the page loads.
    pub fn on_load(&self, session: &impl KeyValueStore) -> GateState {
        if self.is_configured() {
            return match session.get_item(SESSION_FLAG_KEY) {
                Ok(Some(value)) if value == SESSION_FLAG_VALUE => GateState::Authenticated,
                Ok(_) => GateState::LoginRequired,
                Err(err) => {
                    warn!(
                        "event=login_check module=login status=degraded error={}",
                        err
                    );
                    GateState::LoginRequired
                }
            };
        }
        self.bypass(session);
        GateState::Bypassed
    }

    /// Handles one password submission.
    pub fn submit(&self, password: &str, session: &impl KeyValueStore) -> LoginOutcome {
        if !self.is_configured() {
            self.bypass(session);
            return LoginOutcome::Bypassed;
        }
        // Blank input gets the hint; the secret comparison below stays untrimmed.
        if password.trim().is_empty() {
            return LoginOutcome::EmptyPassword {
                hint: "Ingresa la contraseña",
            };
        }
        if self.secrets.iter().any(|secret| secret == password) {
            mark_session(session);
            info!("event=login_submit module=login status=ok");
            return LoginOutcome::Granted;
        }

        info!("event=login_submit module=login status=rejected");
        LoginOutcome::Rejected {
            message: "Contraseña incorrecta",
            shake: true,
        }
    }

    /// Clears the session flag.
    pub fn logout(&self, session: &impl KeyValueStore) {
        if let Err(err) = session.remove_item(SESSION_FLAG_KEY) {
            warn!(
                "event=login_logout module=login status=degraded error={}",
                err
            );
        }
    }

    fn bypass(&self, session: &impl KeyValueStore) {
        warn!("event=login_gate module=login status=bypassed reason=no_secret_configured");
        mark_session(session);
    }
}

fn mark_session(session: &impl KeyValueStore) {
    if let Err(err) = session.set_item(SESSION_FLAG_KEY, SESSION_FLAG_VALUE) {
        warn!(
            "event=login_session module=login status=degraded error={}",
            err
        );
    }
}
