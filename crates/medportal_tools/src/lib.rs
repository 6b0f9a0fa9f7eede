//! Standalone administrative tools for the portal.
//!
//! # Responsibility
//! - Bulk-provision portal accounts in the external identity/document service.
//! - Rasterize app icons from one source image.
//!
//! # Invariants
//! - Tools never touch portal storage; they run outside page rendering.
//! - Network and image dependencies stay out of `medportal_core`.

pub mod icons;
pub mod provision;

pub use icons::{generate_icons, generate_icons_with, IconError, IconPlan, ICON_SIZES, MASKABLE_FILE_NAME};
pub use provision::credentials::{credential_path_from_env, ServiceAccount, CREDENTIAL_ENV_VARS};
pub use provision::directory::{
    AccountDirectory, DirectoryError, DirectoryResult, IdentityRequest, MemoryAccountDirectory,
    ProfileFields,
};
pub use provision::rest::RestAccountDirectory;
pub use provision::roster::{PersonRecord, ROSTER};
pub use provision::runner::{account_uid, derive_password, provision_roster, RecordOutcome};
pub use provision::ProvisionError;
