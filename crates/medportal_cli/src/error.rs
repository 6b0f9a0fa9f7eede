use medportal_core::db::DbError;
use medportal_core::{AccordionError, ConfigError, DashboardError, StorageError};
use medportal_tools::{IconError, ProvisionError};
use std::fmt::{Display, Formatter};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_CONFIG: u8 = 3;

/// Top-level CLI failure.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(String),
    Storage(StorageError),
    Dashboard(DashboardError),
    Accordion(AccordionError),
    Provision(ProvisionError),
    Icons(IconError),
    Input(String),
    /// Login rejected or blocked.
    Denied(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Logging(_) => EXIT_CONFIG,
            Self::Provision(
                ProvisionError::MissingCredentialEnv(_)
                | ProvisionError::CredentialFileMissing(_)
                | ProvisionError::CredentialRead { .. }
                | ProvisionError::CredentialParse { .. },
            ) => EXIT_CONFIG,
            Self::Accordion(_) | Self::Input(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Dashboard(err) => write!(f, "{err}"),
            Self::Accordion(err) => write!(f, "{err}"),
            Self::Provision(err) => write!(f, "{err}"),
            Self::Icons(err) => write!(f, "{err}"),
            Self::Input(message) | Self::Denied(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StorageError> for CliError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Storage(value.into())
    }
}

impl From<DashboardError> for CliError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<AccordionError> for CliError {
    fn from(value: AccordionError) -> Self {
        Self::Accordion(value)
    }
}

impl From<ProvisionError> for CliError {
    fn from(value: ProvisionError) -> Self {
        Self::Provision(value)
    }
}

impl From<IconError> for CliError {
    fn from(value: IconError) -> Self {
        Self::Icons(value)
    }
}
