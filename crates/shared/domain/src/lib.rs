//! # Domain Models
//!
//! Pure data for the hearth workspace: the tracked modules, their self-report records,
//! journal entries and application configuration. Keep it lean: no I/O, no storage, no
//! rule logic. Just data and simple helpers.

pub mod config;
pub mod error;
pub mod journal;
pub mod module;
pub mod record;
pub mod recovery;
pub mod sexual_health;

pub use error::{DomainError, DomainErrorExt};
pub use journal::{Intensity, LogDraft, LogEntry};
pub use module::ModuleId;
pub use record::{Answer, Domain, IssueId, Records, ResponseRecord};
pub use recovery::{Recovery, RecoveryCategory, RecoveryResponse};
pub use sexual_health::{SexualHealth, SexualHealthResponse, SexualIssue};
