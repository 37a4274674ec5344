//! Save Status
//!
//! idle → loading (on submit) → success (auto-reverts to idle) | error

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

/// Status of the most recent save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SaveStatus {
    /// Button state string used by the host UI
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "",
            SaveStatus::Loading => "loading",
            SaveStatus::Success => "success",
            SaveStatus::Error => "error",
        }
    }

    pub fn is_busy(&self) -> bool {
        *self == SaveStatus::Loading
    }
}

/// Shared, observable save status
///
/// Each save gets a generation number; only the latest generation may
/// change the status, so a stale auto-reset never clears a newer save.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: Arc<watch::Sender<SaveStatus>>,
    generation: Arc<AtomicU64>,
}

impl Default for StatusHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SaveStatus::Idle);
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn current(&self) -> SaveStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.tx.subscribe()
    }

    /// Mark a new save as loading and return its generation
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(SaveStatus::Loading);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_if_current(&self, generation: u64, status: SaveStatus) {
        if self.is_current(generation) {
            self.tx.send_replace(status);
        }
    }

    pub fn fail(&self, generation: u64) {
        self.set_if_current(generation, SaveStatus::Error);
    }

    /// Mark success and schedule the revert to idle after `reset_after`
    pub fn succeed(&self, generation: u64, reset_after: Duration) {
        self.set_if_current(generation, SaveStatus::Success);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, save status stays at success");
            return;
        };

        let handle = self.clone();
        runtime.spawn(async move {
            tokio::time::sleep(reset_after).await;
            let reset = handle.tx.send_if_modified(|status| {
                if *status == SaveStatus::Success && handle.is_current(generation) {
                    *status = SaveStatus::Idle;
                    true
                } else {
                    false
                }
            });
            if reset {
                debug!(generation, "save status reset to idle");
            }
        });
    }
}
