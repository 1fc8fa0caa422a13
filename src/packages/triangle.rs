//! Triangle, the two-dimensional mesh generator.
//!
//! Support is not wired up yet, so the plugin is a stub.

use super::{PackageDescriptor, StubPackage};

/// The Triangle plugin.
pub fn triangle() -> StubPackage {
    StubPackage::new(PackageDescriptor::new("Triangle"))
}
