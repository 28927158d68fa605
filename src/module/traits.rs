//! Module system traits and interfaces
//!
//! Defines the contracts between the host, the module factory, and the
//! loaded native module instance.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Opaque marker trait for a loaded native module instance.
///
/// The host never inspects the module beyond holding a reference to it;
/// the actual transcoder surface (formats, memory layout) lives behind this
/// trait in the native binding crate.
pub trait NativeModule: Send + Sync + fmt::Debug {}

/// Shared reference to the loaded native module.
///
/// Absent until loading completes. Set exactly once; never reverts.
pub type ModuleHandle = Arc<dyn NativeModule>;

/// Module lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    /// No load has been requested yet
    Unloaded,
    /// A load is in flight
    Loading,
    /// The module handle is published and available
    Loaded,
    /// The load failed; the module will never become available
    Failed(String),
}

impl ModuleState {
    /// Whether the load reached a terminal outcome (`Loaded` or `Failed`).
    pub fn is_settled(&self) -> bool {
        matches!(self, ModuleState::Loaded | ModuleState::Failed(_))
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleState::Unloaded => write!(f, "unloaded"),
            ModuleState::Loading => write!(f, "loading"),
            ModuleState::Loaded => write!(f, "loaded"),
            ModuleState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Factory that performs the actual asynchronous module instantiation
///
/// This is the seam to the platform binding (JNI-style shared library,
/// embedded WASM runtime, or a host page that already instantiated the
/// module). The loader invokes it exactly once per process under normal
/// operation.
#[async_trait]
pub trait ModuleFactory: Send + Sync {
    /// Instantiate the native module.
    ///
    /// May suspend for as long as instantiation takes; the loader enforces
    /// no timeout. Errors are surfaced as a terminal `Failed` state.
    async fn instantiate(&self) -> Result<ModuleHandle, ModuleError>;
}

/// Module system errors
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module instantiation failed: {0}")]
    InstantiationFailed(String),

    #[error("native library not found: {0}")]
    LibraryNotFound(String),

    #[error("module already loaded")]
    AlreadyLoaded,

    #[error("module load failed: {0}")]
    LoadFailed(String),

    #[error("invalid loader configuration: {0}")]
    InvalidConfig(String),
}

impl From<anyhow::Error> for ModuleError {
    fn from(e: anyhow::Error) -> Self {
        ModuleError::InstantiationFailed(e.to_string())
    }
}
