//! # tsp-org
//!
//! Deployment target resolution for transaction security policy deploys.
//!
//! The platform CLI is treated as a narrow API behind the [`OrgAdapter`]
//! trait: one call describes the authenticated default target, one call
//! deploys source directories with a bounded wait. [`SfCliAdapter`] shells
//! out to `sf`; [`StaticOrgAdapter`] is an in-process stand-in for tests and
//! dry environments.

pub mod adapter;
pub mod config;
pub mod recipient;
pub mod sf;
pub mod static_org;

pub use adapter::{DeployResult, EnvironmentContext, OrgAdapter, OrgError, Result};
pub use config::{OrgConfig, DEFAULT_API_VERSION};
pub use recipient::resolve_recipient;
pub use sf::SfCliAdapter;
pub use static_org::{DeployCall, StaticOrgAdapter};
