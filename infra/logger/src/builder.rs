use crate::Logger;
use crate::error::{LoggerError, LoggerErrorExt};
use crate::filter::{LogFilter, env_filter, validate};
use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) console: bool,
    pub(crate) ansi: bool,
    pub(crate) level: LevelFilter,
    pub(crate) directives: Option<String>,
    pub(crate) file: Option<FileSettings>,
}

#[derive(Debug)]
pub(crate) struct FileSettings {
    pub(crate) dir: PathBuf,
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
    pub(crate) json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { console: true, ansi: true, level: LevelFilter::INFO, directives: None, file: None }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Typestate builder for [`Logger`]: `name` is required, file options unlock after `path`.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    pub(crate) settings: Settings,
    name: N,
    file: PhantomData<F>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { settings: Settings::default(), name: NoName, file: PhantomData }
    }
}

#[allow(private_bounds)]
impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the logger; also the prefix of rolled log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()), file: PhantomData }
    }
}

#[allow(private_bounds)]
impl<F: Sealed> LoggerBuilder<WithName, F> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Applies a parsed `logging.level` value: a level, or fixed directives.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn filter(self, filter: LogFilter) -> Self {
        match filter {
            LogFilter::Level(level) => self.level(level),
            LogFilter::Directives(directives) => self.env_filter(directives),
        }
    }

    /// Fixed filter directives such as `hearth_vault=debug`; `RUST_LOG` is then ignored.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.settings.ansi = enabled;
        self
    }

    /// Adds rolling file output under `dir`.
    pub fn path(mut self, dir: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        self.settings.file = Some(FileSettings {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        LoggerBuilder { settings: self.settings, name: self.name, file: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, a zero file limit, bad
    ///   directives, or when every output is disabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate(&self.settings, &self.name.0)?;
        let filter = env_filter(&self.settings)?;

        let mut layers = Vec::with_capacity(2);
        if self.settings.console {
            layers.push(
                layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(self.settings.ansi)
                    .boxed(),
            );
        }

        let guard = match &self.settings.file {
            Some(file) => {
                fs::create_dir_all(&file.dir)
                    .context(format!("Cannot create log directory {}", file.dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation.clone())
                    .filename_prefix(&self.name.0)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.dir)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Both console and file output are disabled".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// How many rolled files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.settings.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.settings.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Writes file output as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.settings.file.as_mut() {
            file.json = enabled;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_log_info_to_console() {
        let builder = Logger::builder().name("hearth-test").env_filter("hearth=debug");
        assert!(builder.settings.console);
        assert!(builder.settings.ansi);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.directives.as_deref(), Some("hearth=debug"));
        assert!(builder.settings.file.is_none());
    }

    #[test]
    fn file_options_apply_after_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let logs = dir.path().join("logs");
        let builder = Logger::builder()
            .name("hearth-test")
            .ansi(false)
            .path(&logs)
            .max_files(5)
            .json(true)
            .level(LevelFilter::DEBUG);

        let file = builder.settings.file.as_ref().unwrap();
        assert!(!builder.settings.ansi);
        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert!(file.json);
        assert_eq!(file.max_files, 5);
        assert_eq!(file.dir, logs);
    }

    #[test]
    fn parsed_filters_set_level_or_directives() {
        let builder = Logger::builder()
            .name("hearth-test")
            .filter(LogFilter::Directives("hearth_vault=debug".into()));
        assert_eq!(builder.settings.directives.as_deref(), Some("hearth_vault=debug"));

        let builder = Logger::builder().name("hearth-test").filter(LogFilter::Level(LevelFilter::WARN));
        assert_eq!(builder.settings.level, LevelFilter::WARN);
        assert!(builder.settings.directives.is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Logger::builder().name("  ").init().expect_err("blank name must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn disabling_every_output_is_rejected() {
        let err = Logger::builder().name("hearth-test").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_file_limit_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Logger::builder().name("hearth-test").path(dir.path()).max_files(0).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
