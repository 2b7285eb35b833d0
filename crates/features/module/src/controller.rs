use crate::error::{ModuleError, ModuleErrorExt};
use crate::export::{ExportOptions, build_summary};
use crate::indicator::{SaveIndicator, SaveStatus};
use crate::state::{ModuleState, Snapshot};
use chrono::Utc;
use hearth_consent::{Access, ConsentGate};
use hearth_domain::config::JournalConfig;
use hearth_domain::{Domain, LogDraft, LogEntry, Records};
use hearth_kernel::safe_nanoid;
use hearth_redflags::{RedFlagResult, RuleSet, evaluate};
use hearth_vault::{Vault, WriteOutcome};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Answer to a destructive-action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed { Self::Confirmed } else { Self::Declined }
    }
}

/// Owns the state of one module and its persistence.
///
/// Nothing is written until [`ModuleController::save`]; edits and journal appends stay in
/// memory until then. Opening a controller requires the module's consent [`Access`].
///
/// Saving is refused until [`ModuleController::load`] has succeeded, so a failed read can
/// never be followed by a write of empty defaults over stored data.
#[derive(Debug)]
pub struct ModuleController<D: Domain> {
    vault: Vault,
    gate: ConsentGate,
    state: ModuleState<D>,
    indicator: SaveIndicator,
    blank: D::Response,
    loaded: bool,
}

impl<D: Domain> ModuleController<D> {
    /// Opens the module with empty state. Call [`ModuleController::load`] to hydrate.
    ///
    /// # Errors
    /// Returns [`ModuleError::WrongModule`] if `access` was issued for another module.
    pub fn open(vault: Vault, access: Access, settings: &JournalConfig) -> Result<Self, ModuleError> {
        if access.module() != D::MODULE {
            return Err(ModuleError::WrongModule {
                message: format!("access for {} cannot open {}", access.module(), D::MODULE).into(),
                context: None,
            });
        }

        Ok(Self {
            gate: ConsentGate::new(vault.clone()),
            vault,
            state: ModuleState::empty(settings.capacity),
            indicator: SaveIndicator::new(settings.save_indicator_delay()),
            blank: D::Response::default(),
            loaded: false,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &ModuleState<D> {
        &self.state
    }

    #[must_use]
    pub const fn indicator(&self) -> &SaveIndicator {
        &self.indicator
    }

    /// `true` once [`ModuleController::load`] has succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Hydrates consent, records and journal from the vault. A missing or undecodable data
    /// entry yields empty defaults.
    ///
    /// # Errors
    /// If the host store cannot be read, the state falls back to empty defaults, saving is
    /// disabled and [`ModuleError::Consent`] or [`ModuleError::LoadFailed`] is returned.
    /// Calling `load` again retries.
    #[instrument(skip(self), fields(module = %D::MODULE))]
    pub async fn load(&mut self) -> Result<&ModuleState<D>, ModuleError> {
        self.loaded = false;
        self.state = ModuleState::empty(self.state.log.capacity());

        let read = async {
            let consented = self.gate.check_consent(D::MODULE).await.context("Loading consent")?;
            let stored = self
                .vault
                .get_checked::<Snapshot<D>>(&D::MODULE.data_key())
                .await
                .context(D::MODULE.data_key())?;
            Ok::<_, ModuleError>((consented, stored))
        };

        let (consented, stored) = match read.await {
            Ok(read) => read,
            Err(e) => {
                warn!(error = %e, "Module could not be loaded, saving disabled");
                return Err(e);
            },
        };

        self.state.consented = consented;
        match stored {
            Some(stored) => {
                self.state.hydrate(stored);
                debug!(entries = self.state.log.len(), "Module data loaded");
            },
            None => debug!("No stored module data, starting empty"),
        }

        self.loaded = true;
        Ok(&self.state)
    }

    /// Persists records and journal as one snapshot. Reports [`SaveStatus::Error`] without
    /// writing if the module has not been loaded successfully.
    #[instrument(skip(self), fields(module = %D::MODULE))]
    pub async fn save(&mut self) -> SaveStatus {
        if !self.loaded {
            warn!("Module not loaded, refusing to overwrite stored data");
            self.indicator.show(SaveStatus::Error, false);
            return SaveStatus::Error;
        }

        let outcome = self.vault.set(&D::MODULE.data_key(), &self.state.snapshot()).await;

        let status = match outcome {
            WriteOutcome::Encrypted | WriteOutcome::Plaintext => SaveStatus::Saved,
            WriteOutcome::Failed => SaveStatus::Error,
        };
        if status == SaveStatus::Error {
            warn!("Module data could not be saved");
        }

        self.indicator.show(status, outcome.is_degraded());
        status
    }

    /// Prepends a journal entry with a fresh id and the current time.
    pub fn append_log_entry(&mut self, draft: LogDraft<D::Issue>) -> &LogEntry<D::Issue> {
        let entry = LogEntry::from_draft(safe_nanoid!(), Utc::now(), draft);
        self.state.log.push(entry)
    }

    #[must_use]
    pub fn records(&self) -> &Records<D> {
        &self.state.records
    }

    #[must_use]
    pub fn record(&self, issue: D::Issue) -> &D::Response {
        self.state.records.get(&issue).unwrap_or(&self.blank)
    }

    pub fn record_mut(&mut self, issue: D::Issue) -> &mut D::Response {
        self.state.records.entry(issue).or_default()
    }

    pub fn set_record(&mut self, issue: D::Issue, response: D::Response) {
        self.state.records.insert(issue, response);
    }

    /// Deletes the module's data entry and clears memory. Consent is kept, so the module
    /// stays unlocked but empty. Returns `false` for a declined confirmation.
    ///
    /// # Errors
    /// Returns [`ModuleError::RemovalFailed`] if the host store refused; memory is untouched.
    #[instrument(skip(self), fields(module = %D::MODULE))]
    pub async fn reset(&mut self, confirmation: Confirmation) -> Result<bool, ModuleError> {
        if confirmation == Confirmation::Declined {
            debug!("Reset declined");
            return Ok(false);
        }

        if !self.vault.remove(&D::MODULE.data_key()).await {
            return Err(ModuleError::RemovalFailed {
                message: "Host store refused to delete module data".into(),
                context: Some(D::MODULE.data_key().into()),
            });
        }

        self.state.clear();
        info!("Module data reset");
        Ok(true)
    }

    /// Like [`ModuleController::reset`], and also removes consent, relocking the module.
    ///
    /// # Errors
    /// Returns [`ModuleError::RemovalFailed`] if either entry could not be removed.
    #[instrument(skip(self), fields(module = %D::MODULE))]
    pub async fn wipe(&mut self, confirmation: Confirmation) -> Result<bool, ModuleError> {
        if !self.reset(confirmation).await? {
            return Ok(false);
        }

        if !self.gate.forget_consent(D::MODULE).await {
            return Err(ModuleError::RemovalFailed {
                message: "Host store refused to delete consent".into(),
                context: Some(D::MODULE.consent_key().into()),
            });
        }

        self.state.consented = false;
        info!("Module wiped");
        Ok(true)
    }
}

impl<D: RuleSet> ModuleController<D> {
    /// Red flags of `issue` for the current, possibly unsaved, answers.
    #[must_use]
    pub fn red_flags(&self, issue: D::Issue) -> RedFlagResult {
        evaluate::<D>(issue, self.record(issue))
    }

    /// Every issue that currently triggers, in issue order.
    #[must_use]
    pub fn all_red_flags(&self) -> Vec<(D::Issue, RedFlagResult)> {
        D::Issue::iter()
            .map(|issue| (issue, self.red_flags(issue)))
            .filter(|(_, result)| result.triggered)
            .collect()
    }

    #[must_use]
    pub fn export(&self, options: &ExportOptions) -> String {
        build_summary(&self.state, options)
    }
}
