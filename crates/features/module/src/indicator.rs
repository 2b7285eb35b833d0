use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Outcome of the last save, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveStatus {
    Idle,
    Saved,
    Error,
}

/// Transient save feedback: shows `Saved`/`Error` for a fixed delay, then reads `Idle`.
///
/// The reset is evaluated lazily against the tokio clock, so no background task is needed
/// and paused-time tests can drive it with `tokio::time::advance`.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    status: SaveStatus,
    degraded: bool,
    shown_at: Option<Instant>,
    delay: Duration,
}

impl SaveIndicator {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { status: SaveStatus::Idle, degraded: false, shown_at: None, delay }
    }

    pub fn show(&mut self, status: SaveStatus, degraded: bool) {
        self.status = status;
        self.degraded = degraded;
        self.shown_at = (status != SaveStatus::Idle).then(Instant::now);
    }

    #[must_use]
    pub fn status(&self) -> SaveStatus {
        match self.shown_at {
            Some(at) if at.elapsed() < self.delay => self.status,
            _ => SaveStatus::Idle,
        }
    }

    /// `true` while a `Saved` status is showing for a value stored without encryption.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.degraded && self.status() == SaveStatus::Saved
    }

    /// Resolves once the indicator has returned to `Idle`.
    pub async fn settled(&self) {
        if let Some(at) = self.shown_at {
            sleep_until(at + self.delay).await;
        }
    }
}

impl Default for SaveIndicator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
