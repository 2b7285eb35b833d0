use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Environment variable prefix for overrides, e.g. `HEARTH__JOURNAL__CAPACITY=50`.
pub const ENV_PREFIX: &str = "HEARTH";

/// Config file looked up (any supported extension) when no explicit path is given.
pub const DEFAULT_CONFIG_NAME: &str = "hearth";

#[hearth_derive::hearth_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, `hearth.{toml,json,...}` in
///    the working directory is used if present; otherwise every field keeps its serde default.
/// 2. **Environment Overrides**: variables prefixed with `HEARTH__`, nested with double
///    underscores (`HEARTH__STORAGE__DATA_DIR` maps to `storage.data_dir`).
///
/// # Errors
/// * An explicit file is missing or malformed.
/// * Values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use hearth_domain::config::AppConfig;
/// use hearth_kernel::config::load_config;
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(cfg.journal.capacity > 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_layered<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(env.prefix_separator("__").separator("__").convert_case(config::Case::Snake))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_domain::config::AppConfig;
    use std::io::Write;

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[journal]\ncapacity = 40\nsave_indicator_ms = 500\n").unwrap();

        let vars = config::Map::from([
            ("HEARTH__JOURNAL__CAPACITY".to_owned(), "7".to_owned()),
            ("OTHER__JOURNAL__CAPACITY".to_owned(), "9".to_owned()),
        ]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let cfg: AppConfig = load_layered(Some(file.path()), env).unwrap();
        assert_eq!(cfg.journal.capacity, 7);
        assert_eq!(cfg.journal.save_indicator_ms, 500);
    }
}
