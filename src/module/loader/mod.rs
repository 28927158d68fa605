//! Module loading system
//!
//! Handles triggering the asynchronous module load, publishing the handle,
//! and notifying listeners.

pub mod loader;

pub use loader::ModuleLoader;
