use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level configuration shared across the workspace.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub vault: VaultConfig,
    pub journal: JournalConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the file-backed host store keeps its entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Create `data_dir` if it does not exist.
    pub create: bool,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Host-store entry holding the master key. Unset keeps the vault's own default.
    pub master_key_id: Option<String>,
}

/// Journal and save-feedback behavior of module controllers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Maximum retained entries; the oldest are dropped beyond it.
    pub capacity: usize,
    /// How long a `Saved`/`Error` indicator stays visible before returning to idle.
    pub save_indicator_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Number of most recent journal entries included in a summary.
    pub recent_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directives, e.g. `info` or `info,hearth_vault=debug`.
    pub level: String,
    /// Enables the rolling JSON file layer under this directory.
    pub dir: Option<PathBuf>,
    pub ansi: bool,
}

impl JournalConfig {
    #[must_use]
    pub const fn save_indicator_delay(&self) -> Duration {
        Duration::from_millis(self.save_indicator_ms)
    }
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data"), create: true }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self { capacity: 100, save_indicator_ms: 2000 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { recent_entries: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), dir: None, ansi: true }
    }
}
