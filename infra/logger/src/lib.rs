//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for hearth binaries.
//!
//! Libraries only emit events. A binary builds one [`Logger`] at startup and holds it until
//! exit; dropping it flushes the file writer.
//!
//! Console lines go to **stderr**, leaving stdout to command output such as an export. File
//! logs roll over on a schedule and can be written as JSON. `RUST_LOG` wins over the
//! configured level unless [`LoggerBuilder::env_filter`] pins explicit directives.
//!
//! ## Example
//!
//! ```rust
//! # use hearth_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("hearth")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod filter;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::filter::{LogFilter, parse_filter, parse_level};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Keeps the installed subscriber's background writer alive.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the subscriber. A name is required before [`LoggerBuilder::init`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The file writer guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing file logs");
        }
    }
}
