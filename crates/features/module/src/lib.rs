//! # Module
//!
//! Per-module state for the tracked domains: the response record of every issue, the
//! craving/event journal, and the workflows around them.
//!
//! - [`ModuleController`] hydrates from and saves to the vault as one snapshot under
//!   `{module}.data`, and handles confirmed reset and wipe.
//! - [`SaveIndicator`] gives transient `Saved`/`Error` feedback.
//! - [`build_summary`] renders the plain-text export.

mod controller;
mod error;
mod export;
mod indicator;
mod journal;
mod state;

pub use controller::{Confirmation, ModuleController};
pub use error::{ModuleError, ModuleErrorExt};
pub use export::{DEFAULT_RECENT_ENTRIES, ExportOptions, build_summary};
pub use indicator::{SaveIndicator, SaveStatus};
pub use journal::EventLog;
pub use state::ModuleState;
