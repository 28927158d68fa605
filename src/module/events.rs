//! Load notification system
//!
//! Replaces the host-global event bus of the original web shim with an
//! explicit observer surface owned by the loader: listeners register and
//! detach deterministically, and every registered listener receives each
//! published event through its own buffered channel.

use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::module::traits::ModuleHandle;

/// Name of the event dispatched when the module finishes loading.
///
/// Kept identical to the wire name used by the original web loader so
/// host pages listening for it keep working.
pub const MODULE_LOADED_EVENT: &str = "basisuModuleLoaded";

/// Name of the event dispatched when the load fails.
pub const MODULE_LOAD_FAILED_EVENT: &str = "basisuModuleLoadFailed";

/// One-shot load outcome notification.
#[derive(Debug, Clone)]
pub enum ModuleEvent {
    /// The module loaded; carries the published handle.
    Loaded { handle: ModuleHandle },
    /// The load failed terminally.
    LoadFailed { reason: String },
}

impl ModuleEvent {
    /// Stable event name, usable as a dispatch key by host integrations.
    pub fn name(&self) -> &'static str {
        match self {
            ModuleEvent::Loaded { .. } => MODULE_LOADED_EVENT,
            ModuleEvent::LoadFailed { .. } => MODULE_LOAD_FAILED_EVENT,
        }
    }
}

/// Identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

/// Listener registry and event dispatcher.
pub struct EventManager {
    /// Registered listeners (id -> sender)
    listeners: TokioMutex<HashMap<ListenerId, mpsc::Sender<ModuleEvent>>>,
    /// Per-listener channel capacity
    buffer: usize,
}

impl EventManager {
    /// Create an event manager with the given per-listener channel capacity.
    pub fn new(buffer: usize) -> Self {
        Self {
            listeners: TokioMutex::new(HashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Register a listener.
    ///
    /// The listener observes every event published after registration
    /// through the returned receiver. Dropping the receiver detaches the
    /// listener on the next publish.
    pub async fn subscribe(&self) -> (ListenerId, mpsc::Receiver<ModuleEvent>) {
        let id = ListenerId(Uuid::new_v4());
        let (tx, rx) = mpsc::channel(self.buffer);

        let mut listeners = self.listeners.lock().await;
        listeners.insert(id, tx);
        debug!("listener {:?} registered ({} total)", id, listeners.len());

        (id, rx)
    }

    /// Detach a listener.
    pub async fn unsubscribe(&self, id: ListenerId) {
        let mut listeners = self.listeners.lock().await;
        if listeners.remove(&id).is_some() {
            debug!("listener {:?} detached", id);
        }
    }

    /// Deliver an event to every registered listener.
    ///
    /// Listeners whose channel is closed are dropped from the registry.
    /// The loader calls this at most once per load outcome, so each
    /// listener registered before dispatch observes exactly one event.
    pub async fn publish(&self, event: ModuleEvent) {
        let snapshot: Vec<(ListenerId, mpsc::Sender<ModuleEvent>)> = {
            let listeners = self.listeners.lock().await;
            listeners
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        debug!(
            "dispatching {} to {} listener(s)",
            event.name(),
            snapshot.len()
        );

        let mut dead = Vec::new();
        for (id, tx) in snapshot {
            if let Err(e) = tx.send(event.clone()).await {
                warn!("failed to deliver {} to listener {:?}: {}", event.name(), id, e);
                dead.push(id);
            }
        }

        if !dead.is_empty() {
            let mut listeners = self.listeners.lock().await;
            for id in dead {
                listeners.remove(&id);
            }
        }
    }

    /// Number of registered listeners.
    pub async fn listener_count(&self) -> usize {
        self.listeners.lock().await.len()
    }
}
