//! Module system for transcoder-host
//!
//! Loads the native transcoder module asynchronously, publishes its handle to
//! the process, and notifies registered listeners once per load outcome.
//!
//! ## Architecture
//!
//! - **Single Writer**: exactly one load continuation mutates the handle slot
//! - **Write Once**: the handle goes from absent to present at most once and never reverts
//! - **Publish Before Notify**: the handle is visible in the slot before any listener
//!   receives the loaded event
//! - **Explicit Observation**: readiness is a non-blocking pure read; listeners
//!   register and detach deterministically instead of relying on a host-global bus
//! - **Observable Failure**: a failed load settles into an explicit `Failed` state
//!   rather than staying indistinguishable from "still loading"

pub mod events;
pub mod loader;
pub mod platform;
pub mod slot;
pub mod traits;

pub use events::{
    EventManager, ListenerId, ModuleEvent, MODULE_LOADED_EVENT, MODULE_LOAD_FAILED_EVENT,
};
pub use loader::ModuleLoader;
pub use platform::{LibraryLocator, Platform};
pub use slot::ModuleSlot;
pub use traits::{ModuleError, ModuleFactory, ModuleHandle, ModuleState, NativeModule};
