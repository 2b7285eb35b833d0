//! Facade crate for the hearth vault and its modules.
//! Re-exports domain/kernel primitives and composes the runtime from configuration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`domain::config::AppConfig`] (see [`kernel::config::load_config`]).
//! - Call [`Hearth::open`] to connect the file store and build the vault.
//! - Unlock a module with [`Hearth::gate`], then [`Hearth::module`] to edit it.

mod error;

pub use error::{HearthError, HearthErrorExt};
pub use hearth_consent as consent;
pub use hearth_domain as domain;
pub use hearth_kernel as kernel;
pub use hearth_module as module;
pub use hearth_redflags as redflags;
pub use hearth_storage as storage;
pub use hearth_vault as vault;

use hearth_consent::{Access, ConsentGate, GateController};
use hearth_domain::config::AppConfig;
use hearth_domain::{Domain, ModuleId};
use hearth_module::ModuleController;
use hearth_storage::FileStore;
use hearth_vault::Vault;
use tracing::info;

/// Modules compiled into this build.
pub const MODULES: &[ModuleId] = &[ModuleId::SexualHealth, ModuleId::Recovery];

/// A configured runtime: file-backed store, AES-GCM vault and settings.
#[derive(Debug, Clone)]
pub struct Hearth {
    config: AppConfig,
    vault: Vault,
}

impl Hearth {
    /// Connects the file store under `storage.data_dir` and builds the vault.
    ///
    /// # Errors
    /// * [`HearthError::Storage`] if the data directory cannot be opened.
    /// * [`HearthError::Vault`] if the master key id is invalid.
    pub fn open(config: AppConfig) -> Result<Self, HearthError> {
        let store = FileStore::builder()
            .root(config.storage.data_dir.clone())
            .create(config.storage.create)
            .connect()
            .context("Opening data directory")?;

        info!(root = %store.root().display(), "Data directory ready");
        Self::with_store(config, store)
    }

    /// Builds the runtime over any host store.
    ///
    /// # Errors
    /// Returns [`HearthError::Vault`] if the master key id is invalid.
    pub fn with_store(
        config: AppConfig,
        store: impl hearth_storage::HostStore + 'static,
    ) -> Result<Self, HearthError> {
        let mut builder = Vault::builder().store(store);
        if let Some(key_id) = &config.vault.master_key_id {
            builder = builder.key_id(key_id.clone());
        }
        let vault = builder.build().context("Building vault")?;

        Ok(Self { config, vault })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn vault(&self) -> &Vault {
        &self.vault
    }

    /// A consent gate controller for `module`, in the `Loading` state.
    #[must_use]
    pub fn gate(&self, module: ModuleId) -> GateController {
        GateController::new(ConsentGate::new(self.vault.clone()), module)
    }

    /// Opens and hydrates module `D`.
    ///
    /// # Errors
    /// Returns [`HearthError::Module`] if `access` belongs to another module or the stored
    /// data cannot be read.
    pub async fn module<D: Domain>(&self, access: Access) -> Result<ModuleController<D>, HearthError> {
        let mut controller = ModuleController::<D>::open(self.vault.clone(), access, &self.config.journal)
            .context("Opening module")?;
        controller.load().await.context("Loading module")?;
        Ok(controller)
    }
}
