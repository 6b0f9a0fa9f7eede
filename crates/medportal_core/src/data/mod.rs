//! Static tables shipped with the portal.

mod committees;
mod org_chart;

pub use committees::{builtin_catalog, COMMITTEES};
pub use org_chart::{find_group, org_groups, ORG_GROUPS};
