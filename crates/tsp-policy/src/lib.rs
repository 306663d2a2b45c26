//! # tsp-policy
//!
//! Transaction security policy metadata on disk: finding the policy documents
//! and rewriting their notification recipient.
//!
//! ## Key invariants
//!
//! - **Element-scoped edits**: only the text content of recipient elements is
//!   ever rewritten. Every other byte of a policy file is preserved.
//! - **Idempotent**: patching twice with the same recipient yields the same
//!   bytes as patching once, and an unchanged file is never rewritten.
//! - **Best effort per file**: one unreadable or malformed policy never stops
//!   the rest of the batch.

pub mod config;
pub mod discovery;
pub mod error;
pub mod patch;
pub mod placeholder;

pub use config::PolicyConfig;
pub use discovery::{count_files, discover, Discovery};
pub use error::PolicyError;
pub use patch::{patch_all, patch_file, PatchOutcome, PatchReport};
pub use placeholder::{patch_content, ContentPatch, PlaceholderError};
