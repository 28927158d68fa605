//! Module loader implementation
//!
//! Owns the factory seam, the handle slot, and the event manager, and runs
//! the single asynchronous load continuation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::module::events::{EventManager, ModuleEvent};
use crate::module::slot::ModuleSlot;
use crate::module::traits::{ModuleError, ModuleFactory, ModuleHandle, ModuleState};

/// Loader for the native transcoder module.
///
/// One loader manages one module. The load is requested at most once per
/// loader; the continuation publishes the handle into the slot before any
/// listener is notified, so an observer that sees the loaded event (or the
/// `Loaded` state) can immediately take the handle.
pub struct ModuleLoader {
    factory: Arc<dyn ModuleFactory>,
    slot: Arc<ModuleSlot>,
    events: Arc<EventManager>,
    requested: AtomicBool,
    config: LoaderConfig,
}

impl ModuleLoader {
    /// Create a loader with default configuration.
    pub fn new(factory: Arc<dyn ModuleFactory>) -> Self {
        Self::with_config(factory, LoaderConfig::default())
    }

    /// Create a loader with explicit configuration.
    pub fn with_config(factory: Arc<dyn ModuleFactory>, config: LoaderConfig) -> Self {
        let events = Arc::new(EventManager::new(config.event_buffer));
        Self {
            factory,
            slot: Arc::new(ModuleSlot::new()),
            events,
            requested: AtomicBool::new(false),
            config,
        }
    }

    /// Trigger the asynchronous module load.
    ///
    /// Idempotent: only the first call starts the load, repeat calls are
    /// no-ops. Returns immediately; the load continues on a spawned task.
    /// Must be called from within a Tokio runtime.
    ///
    /// There is no way to cancel the load once requested, and no timeout
    /// is enforced on the factory.
    pub fn request_load(&self) {
        if !self.config.enabled {
            info!("module loading disabled by configuration");
            return;
        }
        if self.requested.swap(true, Ordering::SeqCst) {
            debug!("module load already requested");
            return;
        }

        info!("Loading Basis Universal native transcoder module");
        self.slot.mark_loading();

        let factory = Arc::clone(&self.factory);
        let slot = Arc::clone(&self.slot);
        let events = Arc::clone(&self.events);
        tokio::spawn(async move {
            match factory.instantiate().await {
                Ok(handle) => {
                    // Publish the handle before notifying anyone: a listener
                    // reacting to the event must find the slot loaded.
                    if let Err(e) = slot.publish(Arc::clone(&handle)) {
                        warn!("module handle rejected: {}", e);
                        return;
                    }
                    info!("native transcoder module loaded");
                    events.publish(ModuleEvent::Loaded { handle }).await;
                }
                Err(e) => {
                    warn!("native transcoder module failed to load: {}", e);
                    let reason = e.to_string();
                    slot.fail(reason.clone());
                    events.publish(ModuleEvent::LoadFailed { reason }).await;
                }
            }
        });
    }

    /// Whether the module handle is available.
    ///
    /// Pure, non-blocking read; never triggers a load. `false` both while a
    /// load is still in flight and after a failed load; use
    /// [`ModuleLoader::state`] to tell the two apart.
    pub fn is_loaded(&self) -> bool {
        self.slot.is_loaded()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModuleState {
        self.slot.state()
    }

    /// The module handle, if loaded.
    pub fn handle(&self) -> Option<ModuleHandle> {
        self.slot.handle()
    }

    /// Subscribe to lifecycle state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<ModuleState> {
        self.slot.subscribe()
    }

    /// Wait until the load settles, returning the handle.
    ///
    /// Resolves with the handle once loaded, or [`ModuleError::LoadFailed`]
    /// if the factory failed. Suspends indefinitely while the load is in
    /// flight (no timeout is enforced); callers wanting a bound can wrap
    /// this in `tokio::time::timeout`.
    pub async fn wait_until_loaded(&self) -> Result<ModuleHandle, ModuleError> {
        let mut rx = self.slot.subscribe();
        let settled = rx
            .wait_for(|state| state.is_settled())
            .await
            .map_err(|_| ModuleError::LoadFailed("loader state channel closed".to_string()))?
            .clone();

        match settled {
            ModuleState::Loaded => self.slot.handle().ok_or_else(|| {
                ModuleError::LoadFailed("module handle missing after load".to_string())
            }),
            ModuleState::Failed(reason) => Err(ModuleError::LoadFailed(reason)),
            ModuleState::Unloaded | ModuleState::Loading => {
                unreachable!("wait_for only returns settled states")
            }
        }
    }

    /// Event manager for registering load listeners.
    pub fn events(&self) -> Arc<EventManager> {
        Arc::clone(&self.events)
    }

    /// The underlying handle slot, shareable with readiness queries elsewhere.
    pub fn slot(&self) -> Arc<ModuleSlot> {
        Arc::clone(&self.slot)
    }

    /// Loader configuration in effect.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}
