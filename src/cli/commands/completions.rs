//! Shell completions generation.
//!
//! The `pkgprobe completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "pkgprobe", &mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn generate(shell: Shell) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(shell, &mut cmd, "pkgprobe", &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_completions_cover_subcommands() {
        let output = generate(Shell::Bash);
        assert!(output.contains("pkgprobe"));
        assert!(output.contains("configure"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn zsh_completions_name_binary() {
        assert!(generate(Shell::Zsh).contains("pkgprobe"));
    }
}
