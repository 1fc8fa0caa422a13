//! ScientificPython, which FIAT imports at load time.
//!
//! Locate-only: there is no source archive, so it must already be present
//! in one of the candidate roots.

use super::locate::Verification;
use super::{LocatePackage, PackageDescriptor};

/// The ScientificPython plugin for interpreter `python_version`.
pub fn scientific_python(python_version: &str) -> LocatePackage {
    let descriptor = PackageDescriptor::new("ScientificPython")
        .with_liblist(vec![vec!["Scientific".to_string()]])
        .with_python_layout(python_version);

    LocatePackage::new(
        descriptor,
        Verification::new("Scientific", &["Geometry", "Functions"]),
    )
}
