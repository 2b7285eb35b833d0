use crate::error::{ConsentError, ConsentErrorExt};
use hearth_domain::ModuleId;
use hearth_vault::{Vault, WriteOutcome};
use tracing::{info, instrument, warn};

/// Reads and writes per-module consent flags.
#[derive(Debug, Clone)]
pub struct ConsentGate {
    vault: Vault,
}

impl ConsentGate {
    #[must_use]
    pub const fn new(vault: Vault) -> Self {
        Self { vault }
    }

    /// `true` only if the flag is stored and reads `true`. Absent or unreadable is `false`.
    ///
    /// Use [`ConsentGate::check_consent`] where a store failure must not read as "locked".
    pub async fn has_consented(&self, module: ModuleId) -> bool {
        match self.check_consent(module).await {
            Ok(consented) => consented,
            Err(e) => {
                warn!(%module, error = %e, "Consent flag unreadable, treating as locked");
                false
            },
        }
    }

    /// Like [`ConsentGate::has_consented`], but a host-store read failure is an error.
    ///
    /// # Errors
    /// Returns [`ConsentError::Unreadable`] if the host store cannot be read.
    pub async fn check_consent(&self, module: ModuleId) -> Result<bool, ConsentError> {
        let flag = self
            .vault
            .get_checked::<bool>(&module.consent_key())
            .await
            .context(module.consent_key())?;
        Ok(flag.unwrap_or(false))
    }

    #[instrument(skip(self), fields(module = %module))]
    pub async fn grant_consent(&self, module: ModuleId) -> WriteOutcome {
        let outcome = self.vault.set(&module.consent_key(), &true).await;
        match outcome {
            WriteOutcome::Encrypted => info!("Consent granted"),
            WriteOutcome::Plaintext => warn!("Consent granted, stored without encryption"),
            WriteOutcome::Failed => warn!("Consent could not be stored"),
        }
        outcome
    }

    /// Removes the consent entry, relocking the module. Returns `false` if the store refused.
    #[instrument(skip(self), fields(module = %module))]
    pub async fn forget_consent(&self, module: ModuleId) -> bool {
        self.vault.remove(&module.consent_key()).await
    }
}

/// UI-facing state of a module's gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    /// The flag has not been read yet.
    Loading,
    Locked,
    Unlocked,
}

/// Proof that a module's gate was unlocked. Required to open the module's data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    module: ModuleId,
}

impl Access {
    #[must_use]
    pub const fn module(self) -> ModuleId {
        self.module
    }
}

/// Drives one module's gate: `Loading -> Locked -> Unlocked`, or straight to `Unlocked`
/// when consent was given earlier.
#[derive(Debug)]
pub struct GateController {
    gate: ConsentGate,
    module: ModuleId,
    state: GateState,
}

impl GateController {
    #[must_use]
    pub const fn new(gate: ConsentGate, module: ModuleId) -> Self {
        Self { gate, module, state: GateState::Loading }
    }

    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    #[must_use]
    pub const fn module(&self) -> ModuleId {
        self.module
    }

    /// Reads the stored flag and settles into `Locked` or `Unlocked`.
    ///
    /// # Errors
    /// Returns [`ConsentError::Unreadable`] if the flag cannot be read; the gate goes back
    /// to `Loading` so the read can be retried.
    pub async fn refresh(&mut self) -> Result<GateState, ConsentError> {
        match self.gate.check_consent(self.module).await {
            Ok(consented) => {
                self.state = if consented { GateState::Unlocked } else { GateState::Locked };
                Ok(self.state)
            },
            Err(e) => {
                self.state = GateState::Loading;
                Err(e)
            },
        }
    }

    /// The single "enter" action: grants consent and unlocks.
    ///
    /// A plaintext (degraded) write still unlocks.
    ///
    /// # Errors
    /// Returns [`ConsentError::NotPersisted`] if the flag could not be stored; the gate
    /// stays locked.
    pub async fn enter(&mut self) -> Result<Access, ConsentError> {
        if self.state == GateState::Unlocked {
            return Ok(Access { module: self.module });
        }

        if self.gate.grant_consent(self.module).await.is_persisted() {
            self.state = GateState::Unlocked;
            Ok(Access { module: self.module })
        } else {
            self.state = GateState::Locked;
            Err(ConsentError::NotPersisted {
                message: "Host store rejected the consent flag".into(),
                context: Some(self.module.consent_key().into()),
            })
        }
    }

    /// Access for an already unlocked gate.
    ///
    /// # Errors
    /// Returns [`ConsentError::Locked`] unless the state is `Unlocked`.
    pub fn access(&self) -> Result<Access, ConsentError> {
        match self.state {
            GateState::Unlocked => Ok(Access { module: self.module }),
            GateState::Loading | GateState::Locked => Err(ConsentError::Locked {
                message: format!("{} requires consent", self.module.title()).into(),
                context: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_storage::MemoryStore;

    #[tokio::test]
    async fn test_starts_loading_then_locked() {
        let vault = Vault::builder().store(MemoryStore::new()).build().unwrap();
        let mut controller = GateController::new(ConsentGate::new(vault), ModuleId::Recovery);

        assert_eq!(controller.state(), GateState::Loading);
        assert!(controller.access().is_err());
        assert_eq!(controller.refresh().await.unwrap(), GateState::Locked);
        assert!(matches!(controller.access(), Err(ConsentError::Locked { .. })));
    }
}
