//! The always-absent plugin.

use super::{Package, PackageDescriptor};
use crate::context::ConfigureContext;
use crate::error::Result;
use crate::probe::Guess;

/// A package that is never searched for.
///
/// Configure always succeeds and publishes empty `<UPPER>_INCLUDE` and
/// `<UPPER>_LIB` substitutions so build templates that mention the package
/// still expand. The package is never registered as found.
#[derive(Debug, Clone)]
pub struct StubPackage {
    descriptor: PackageDescriptor,
}

impl StubPackage {
    pub fn new(descriptor: PackageDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Package for StubPackage {
    fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    fn configure_library(&mut self, _ctx: &mut ConfigureContext, _guesses: &[Guess]) -> Result<()> {
        Ok(())
    }

    fn set_output(&self, ctx: &mut ConfigureContext) {
        let upper = &self.descriptor.upper;
        ctx.add_substitution(&format!("{}_INCLUDE", upper), "");
        ctx.add_substitution(&format!("{}_LIB", upper), "");
    }

    fn found(&self) -> bool {
        false
    }
}
