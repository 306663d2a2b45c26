//! # tsp-pipeline
//!
//! The deploy run for transaction security policies, as one linear sequence:
//!
//! 1. **Discover** policy files under the policy directory
//! 2. **Confirm** the target and recipient with the operator
//! 3. **Patch** the recipient into each policy, idempotently
//! 4. **Deploy** the policy and condition-class directories
//! 5. **Summarize** what was deployed
//!
//! Prerequisite and target resolution failures stop the run before step 1.
//! Step 2 is the only place an operator can abort; step 4 is the only fatal
//! step after mutation starts.

pub mod config;
pub mod console;
pub mod error;
pub mod pipeline;

pub use config::{ConfigError, DeployConfig, DisplayConfig, CONFIG_FILE};
pub use console::Console;
pub use error::PipelineError;
pub use pipeline::{Pipeline, RunOutcome, RunSummary};
