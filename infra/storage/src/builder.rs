use crate::error::{StorageError, StorageErrorExt};
use crate::file::{FileStore, FileStoreInner};
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    create: bool,
}

impl Default for FileStoreBuilder {
    fn default() -> Self {
        Self { state: NoRoot, create: true }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use = "Creates a new file store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory for the file store"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        FileStoreBuilder { state: WithRoot(path.into()), create: self.create }
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Initializes the file store.
    ///
    /// 1. Creates the root directory when `create(true)` (the default).
    /// 2. Canonicalizes the root so later joins cannot be redirected by symlinks.
    /// 3. Purges stale temporary files from interrupted writes (non-fatal).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root is missing and `create` is false, or if the
    /// process lacks permission to create or resolve it.
    pub fn connect(self) -> Result<FileStore, StorageError> {
        let root = &self.state.0;

        if self.create {
            fs::create_dir_all(root)
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
            info!(path = %root.display(), "Bootstrapped store root directory");
        }

        let canonical = fs::canonicalize(root)
            .context(format!("Failed to resolve store root: {}", root.display()))?;

        let store = FileStore {
            inner: Arc::new(FileStoreInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        };

        store.purge_tmp();

        Ok(store)
    }
}
