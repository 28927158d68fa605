//! Write-once module handle slot
//!
//! Holds the process's reference to the loaded native module. The slot is an
//! explicitly owned value (typically behind an `Arc` shared between the loader
//! and anything that queries readiness) rather than an ambient global, so
//! multiple independent instances can coexist in tests.
//!
//! Single writer, many readers: only the load continuation mutates the slot,
//! and it does so at most once. Readers never block and never suspend.

use std::sync::OnceLock;
use tokio::sync::watch;

use crate::module::traits::{ModuleError, ModuleHandle, ModuleState};

/// Write-once holder for the native module handle with an observable state.
///
/// Invariants:
/// - the handle transitions from absent to present at most once and never reverts
/// - the handle is written before the state flips to [`ModuleState::Loaded`]
/// - a `Failed` state never overwrites `Loaded`
pub struct ModuleSlot {
    handle: OnceLock<ModuleHandle>,
    state_tx: watch::Sender<ModuleState>,
}

impl ModuleSlot {
    /// Create an empty slot in the `Unloaded` state.
    pub fn new() -> Self {
        let (state_tx, _state_rx) = watch::channel(ModuleState::Unloaded);
        Self {
            handle: OnceLock::new(),
            state_tx,
        }
    }

    /// Whether the module handle is present.
    ///
    /// Pure read: non-blocking, no side effects, never triggers a load.
    /// Readiness is defined as handle presence, so a failed load still
    /// reports `false` here; use [`ModuleSlot::state`] to distinguish.
    pub fn is_loaded(&self) -> bool {
        self.handle.get().is_some()
    }

    /// The module handle, if the load has completed.
    pub fn handle(&self) -> Option<ModuleHandle> {
        self.handle.get().cloned()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModuleState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state transitions.
    ///
    /// The receiver observes every state the slot settles into after the
    /// subscription, plus the state current at subscription time.
    pub fn subscribe(&self) -> watch::Receiver<ModuleState> {
        self.state_tx.subscribe()
    }

    /// Mark the load as in flight.
    pub(crate) fn mark_loading(&self) {
        self.state_tx.send_replace(ModuleState::Loading);
    }

    /// Publish the loaded handle.
    ///
    /// The handle write happens before the state transition, so any reader
    /// observing `Loaded` also observes the handle. A second publish is
    /// rejected with [`ModuleError::AlreadyLoaded`].
    pub(crate) fn publish(&self, handle: ModuleHandle) -> Result<(), ModuleError> {
        self.handle
            .set(handle)
            .map_err(|_| ModuleError::AlreadyLoaded)?;
        self.state_tx.send_replace(ModuleState::Loaded);
        Ok(())
    }

    /// Record a terminal load failure.
    ///
    /// Ignored once the module is loaded: `Loaded` never reverts.
    pub(crate) fn fail(&self, reason: String) {
        if self.is_loaded() {
            return;
        }
        self.state_tx.send_replace(ModuleState::Failed(reason));
    }
}

impl Default for ModuleSlot {
    fn default() -> Self {
        Self::new()
    }
}
