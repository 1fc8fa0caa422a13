//! Candidate install locations.
//!
//! Guesses are produced in a fixed priority order: the user's explicit
//! directory, then the root a package was installed into during this run,
//! then the configured system roots. Within a root every library layout and
//! every library set is tried in declaration order.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::packages::PackageDescriptor;

/// A candidate location where a package might be installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guess {
    /// Human-readable tag describing where the guess came from.
    pub location: String,
    /// Install root the guess was derived from.
    pub root: PathBuf,
    /// Library files expected under the root.
    pub libraries: Vec<PathBuf>,
    /// Include directory under the root.
    pub include_dir: PathBuf,
}

impl Guess {
    /// Directory holding the first library file.
    ///
    /// This is the directory the module loader probes.
    pub fn lib_dir(&self) -> PathBuf {
        self.libraries
            .first()
            .and_then(|lib| lib.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone())
    }
}

/// Where guesses are drawn from.
#[derive(Debug, Clone, Default)]
pub struct GuessSources<'a> {
    /// Root the user pointed at explicitly.
    pub user_dir: Option<&'a Path>,
    /// Root the package was installed into during this run.
    pub installed_root: Option<&'a Path>,
    /// Default system roots.
    pub search_roots: &'a [PathBuf],
}

/// Generate guesses for `descriptor` in priority order.
pub fn generate_guesses(descriptor: &PackageDescriptor, sources: &GuessSources<'_>) -> Vec<Guess> {
    let mut roots: Vec<(String, &Path)> = Vec::new();

    if let Some(dir) = sources.user_dir {
        roots.push((format!("User specified root directory {}", dir.display()), dir));
    }
    if let Some(dir) = sources.installed_root {
        roots.push((
            format!("Package specific installation root {}", dir.display()),
            dir,
        ));
    }
    for dir in sources.search_roots {
        roots.push((format!("Default system location {}", dir.display()), dir));
    }

    let mut layouts = vec![descriptor.libdir.as_path()];
    if descriptor.altlibdir != descriptor.libdir {
        layouts.push(descriptor.altlibdir.as_path());
    }

    let mut guesses = Vec::new();
    for (location, root) in &roots {
        for layout in &layouts {
            for libset in &descriptor.liblist {
                guesses.push(Guess {
                    location: location.clone(),
                    root: root.to_path_buf(),
                    libraries: libset.iter().map(|f| root.join(layout).join(f)).collect(),
                    include_dir: root.join(&descriptor.includedir),
                });
            }
        }
    }

    tracing::debug!(
        package = %descriptor.name,
        count = guesses.len(),
        "generated guesses"
    );
    guesses
}
