//! Install command implementation.
//!
//! The `pkgprobe install` command copies a package out of its extracted
//! source tree into the install root without configuring anything.

use crate::cli::args::InstallArgs;
use crate::cli::settings::Settings;
use crate::context::ConfigureContext;
use crate::error::Result;
use crate::framework::Framework;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    settings: Settings,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(settings: &Settings, args: InstallArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.settings.resolve()?;
        let mut ctx = ConfigureContext::new(options);
        let mut framework = Framework::new(&ctx.options);

        let root = framework.install(&self.args.package, &self.args.source, &mut ctx, ui)?;

        for action in ctx.actions.entries() {
            ui.success(&action.message);
        }
        tracing::debug!(root = %root.display(), "install finished");
        Ok(CommandResult::success())
    }
}
