//! Fault injection for exercising host-store failure paths.

use crate::HostStore;
use crate::error::StorageError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Wraps another [`HostStore`] and fails operations on demand.
///
/// Failures surface as [`StorageError::Unavailable`], the same shape a full quota or a
/// disabled storage area produces.
#[derive(Debug, Clone)]
pub struct FlakyStore<S> {
    inner: S,
    state: Arc<FlakyState>,
}

#[derive(Debug, Default)]
struct FlakyState {
    fail_reads: AtomicBool,
    /// Reads of this key fail even while `fail_reads` is off.
    failing_key: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    /// Number of upcoming writes allowed to succeed while `fail_writes` is set.
    writes_allowed: AtomicUsize,
}

impl<S: HostStore> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, state: Arc::new(FlakyState::default()) }
    }

    /// Turning reads back on also clears [`FlakyStore::fail_reads_for`].
    pub fn fail_reads(&self, enabled: bool) {
        if !enabled {
            *self.state.failing_key.lock() = None;
        }
        self.state.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Fails reads of `key` only.
    pub fn fail_reads_for(&self, key: &str) {
        *self.state.failing_key.lock() = Some(key.to_owned());
    }

    pub fn fail_writes(&self, enabled: bool) {
        self.state.writes_allowed.store(0, Ordering::SeqCst);
        self.state.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Fails every write after the next `allowed` successful ones.
    pub fn fail_writes_after(&self, allowed: usize) {
        self.state.writes_allowed.store(allowed, Ordering::SeqCst);
        self.state.fail_writes.store(true, Ordering::SeqCst);
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn write_blocked(&self) -> bool {
        if !self.state.fail_writes.load(Ordering::SeqCst) {
            return false;
        }
        self.state
            .writes_allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }

    fn unavailable(op: &'static str) -> StorageError {
        StorageError::Unavailable { message: "injected failure".into(), context: Some(op.into()) }
    }
}

impl<S: HostStore> HostStore for FlakyStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.state.fail_reads.load(Ordering::SeqCst)
            || self.state.failing_key.lock().as_deref() == Some(key)
        {
            return Err(Self::unavailable("get"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.write_blocked() {
            return Err(Self::unavailable("set"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.write_blocked() {
            return Err(Self::unavailable("remove"));
        }
        self.inner.remove(key)
    }
}
