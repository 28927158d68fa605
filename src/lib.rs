//! Transcoder Host - loader for the Basis Universal native transcoder module
//!
//! This crate provides the host side of the native transcoder integration:
//! it asynchronously instantiates the externally supplied transcoder module
//! through a factory seam, publishes the resulting opaque handle to the
//! process, and notifies registered listeners exactly once per load outcome.
//! The transcoder itself (formats, codecs, memory layout) lives behind the
//! [`NativeModule`] trait and is out of this crate's scope.
//!
//! ## Design Principles
//!
//! 1. **No Ambient Globals**: the handle lives in an explicitly owned
//!    [`ModuleSlot`], so independent loaders can coexist in one process
//! 2. **Write Once**: the handle transitions from absent to present at most
//!    once and never reverts
//! 3. **Publish Before Notify**: readiness is observable before any listener
//!    callback runs
//! 4. **Observable Failure**: a failed instantiation settles into an explicit
//!    `Failed` state instead of looking like a load that never finishes
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use transcoder_host::{ModuleFactory, ModuleLoader};
//!
//! # async fn run(factory: Arc<dyn ModuleFactory>) {
//! let loader = ModuleLoader::new(factory);
//! let (_, mut events) = loader.events().subscribe().await;
//!
//! loader.request_load();
//! let handle = loader.wait_until_loaded().await.expect("load failed");
//! let notification = events.recv().await;
//! # let _ = (handle, notification);
//! # }
//! ```

pub mod config;
pub mod module;

// Re-export config
pub use config::LoaderConfig;

// Re-export the module system surface
pub use module::{
    EventManager, LibraryLocator, ListenerId, ModuleError, ModuleEvent, ModuleFactory,
    ModuleHandle, ModuleLoader, ModuleSlot, ModuleState, NativeModule, Platform,
    MODULE_LOADED_EVENT, MODULE_LOAD_FAILED_EVENT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Debug)]
    struct StubModule;
    impl NativeModule for StubModule {}

    struct StubFactory;

    #[async_trait]
    impl ModuleFactory for StubFactory {
        async fn instantiate(&self) -> Result<ModuleHandle, ModuleError> {
            Ok(Arc::new(StubModule))
        }
    }

    #[tokio::test]
    async fn test_load_roundtrip() {
        let loader = ModuleLoader::new(Arc::new(StubFactory));
        assert!(!loader.is_loaded());

        loader.request_load();
        let handle = loader.wait_until_loaded().await.unwrap();

        assert!(loader.is_loaded());
        assert!(Arc::ptr_eq(&handle, &loader.handle().unwrap()));
    }

    #[tokio::test]
    async fn test_disabled_loader_never_loads() {
        let config = LoaderConfig {
            enabled: false,
            ..LoaderConfig::default()
        };
        let loader = ModuleLoader::with_config(Arc::new(StubFactory), config);

        loader.request_load();
        tokio::task::yield_now().await;

        assert!(!loader.is_loaded());
        assert_eq!(loader.state(), ModuleState::Unloaded);
    }
}
