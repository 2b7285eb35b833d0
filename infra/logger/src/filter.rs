use crate::builder::Settings;
use crate::error::LoggerError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Parses a level name from configuration (`"trace"`, `"INFO"`, `"off"`, ...).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown name.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggerError> {
    raw.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{raw}': {e}").into(),
        context: None,
    })
}

/// A configured log filter: a bare level or `EnvFilter` directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    Level(LevelFilter),
    /// e.g. `info,hearth_vault=debug`
    Directives(String),
}

/// Parses a `logging.level` value. Anything containing `=` or `,` is read as directives;
/// everything else must be a level name.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown level or malformed directives.
pub fn parse_filter(raw: &str) -> Result<LogFilter, LoggerError> {
    let raw = raw.trim();
    if !raw.contains(['=', ',']) {
        return parse_level(raw).map(LogFilter::Level);
    }

    EnvFilter::builder().parse(raw).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid filter directives '{raw}': {e}").into(),
        context: None,
    })?;
    Ok(LogFilter::Directives(raw.to_owned()))
}

pub(crate) fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    let problem = if name.trim().is_empty() {
        Some("Logger name cannot be empty")
    } else if settings.file.as_ref().is_some_and(|f| f.max_files == 0) {
        Some("max_files must be greater than zero")
    } else {
        None
    };

    match problem {
        Some(message) => {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        },
        None => Ok(()),
    }
}

/// Explicit directives win; otherwise `RUST_LOG` on top of the configured level.
pub(crate) fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());

    let Some(directives) = settings.directives.as_deref() else {
        return Ok(builder.from_env_lossy());
    };

    builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid filter directives '{directives}': {e}").into(),
        context: None,
    })
}
