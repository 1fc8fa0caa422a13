//! Module loading for capability checks.
//!
//! A candidate install directory is checked by asking a [`ModuleLoader`]
//! for a [`ModuleHandle`] and then asking the handle for the symbols the
//! package must expose. Nothing here touches process-wide state; the
//! directories probed are recorded by the caller.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a module could not be loaded from a candidate directory.
///
/// These are recoverable: the guess loop logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The candidate directory does not exist.
    #[error("No such directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The directory exists but holds no module of that name.
    #[error("No module named {module}")]
    ModuleNotFound { module: String },

    /// The module exists but a required symbol is absent.
    #[error("cannot import name {symbol} from {module}")]
    MissingSymbol { module: String, symbol: String },
}

/// A module resolved from a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    root: PathBuf,
    module: String,
}

impl ModuleHandle {
    /// Create a handle for `module` located at `root`.
    pub fn new(root: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            module: module.into(),
        }
    }

    /// Directory containing the module.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Module name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether the module exposes `symbol`, either as a source file
    /// (`<symbol>.py`) or a subpackage directory.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        let base = self.root.join(&self.module);
        base.join(format!("{}.py", symbol)).is_file() || base.join(symbol).is_dir()
    }

    /// Require every symbol, failing on the first one missing.
    pub fn require(&self, symbols: &[&str]) -> Result<(), LoadError> {
        match symbols.iter().find(|s| !self.has_symbol(s)) {
            Some(missing) => Err(LoadError::MissingSymbol {
                module: self.module.clone(),
                symbol: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.module, self.root.display())
    }
}

/// Resolves modules from candidate directories.
pub trait ModuleLoader {
    /// Load `module` from `dir`.
    fn load(&self, dir: &Path, module: &str) -> Result<ModuleHandle, LoadError>;
}

/// Loader that resolves modules as package directories on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModuleLoader;

impl ModuleLoader for FsModuleLoader {
    fn load(&self, dir: &Path, module: &str) -> Result<ModuleHandle, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::NotADirectory(dir.to_path_buf()));
        }
        if !dir.join(module).is_dir() {
            return Err(LoadError::ModuleNotFound {
                module: module.to_string(),
            });
        }
        Ok(ModuleHandle::new(dir, module))
    }
}
