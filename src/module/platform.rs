//! Target platform detection and native library resolution
//!
//! Maps the transcoder's base library name to the platform-specific file
//! a factory implementation has to instantiate. On the web target the host
//! page instantiates the module itself, so no file resolution happens there.

use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::module::traits::ModuleError;

/// Platform the host is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Android,
    Ios,
    Web,
}

impl Platform {
    /// Platform of the current compile target.
    pub fn current() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Platform::Web
        }
        #[cfg(all(not(target_arch = "wasm32"), target_os = "android"))]
        {
            Platform::Android
        }
        #[cfg(all(not(target_arch = "wasm32"), target_os = "ios"))]
        {
            Platform::Ios
        }
        #[cfg(all(not(target_arch = "wasm32"), target_os = "macos"))]
        {
            Platform::MacOs
        }
        #[cfg(all(not(target_arch = "wasm32"), target_os = "windows"))]
        {
            Platform::Windows
        }
        #[cfg(all(
            not(target_arch = "wasm32"),
            not(any(
                target_os = "android",
                target_os = "ios",
                target_os = "macos",
                target_os = "windows"
            ))
        ))]
        {
            Platform::Linux
        }
    }

    /// File name of the native library for this platform.
    ///
    /// `base` is the unadorned library name, e.g. `gdx-basis-universal`.
    pub fn library_file_name(&self, base: &str) -> String {
        match self {
            Platform::Linux | Platform::Android => format!("lib{}.so", base),
            Platform::MacOs | Platform::Ios => format!("lib{}.dylib", base),
            Platform::Windows => format!("{}.dll", base),
            Platform::Web => format!("{}.wasm", base),
        }
    }

    /// Whether the module is instantiated by the host environment itself.
    ///
    /// On the web the page's script loads the WASM module; the loader must
    /// not attempt an explicit native load there.
    pub fn is_module_preloaded(&self) -> bool {
        matches!(self, Platform::Web)
    }
}

/// Resolves the on-disk location of the native transcoder library.
///
/// Used by factory implementations to turn the configured base name into a
/// concrete path before binding it.
pub struct LibraryLocator {
    search_dir: PathBuf,
    base_name: String,
    platform: Platform,
}

impl LibraryLocator {
    /// Create a locator for the current platform from loader configuration.
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_platform(config, Platform::current())
    }

    /// Create a locator for an explicit platform.
    pub fn with_platform(config: &LoaderConfig, platform: Platform) -> Self {
        Self {
            search_dir: PathBuf::from(&config.modules_dir),
            base_name: config.library_name.clone(),
            platform,
        }
    }

    /// The path the library is expected at for this platform.
    pub fn candidate(&self) -> PathBuf {
        self.search_dir
            .join(self.platform.library_file_name(&self.base_name))
    }

    /// Resolve the library path, verifying the file exists.
    pub fn locate(&self) -> Result<PathBuf, ModuleError> {
        let candidate = self.candidate();
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(ModuleError::LibraryNotFound(format!(
                "{} (searched {})",
                self.platform.library_file_name(&self.base_name),
                self.search_dir.display()
            )))
        }
    }

    /// Directory searched for the library.
    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }
}
