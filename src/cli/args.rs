//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// pkgprobe - Locate, install, or stub out optional external packages.
#[derive(Debug, Parser)]
#[command(name = "pkgprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .pkgprobe/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output, including the configure transcript
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Root directory packages are installed into
    #[arg(long, global = true, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Prefix for the elevated install command (e.g. "sudo ")
    #[arg(long, global = true, value_name = "PREFIX")]
    pub sudo: Option<String>,

    /// Look for a package under a specific root (NAME=PATH)
    #[arg(long = "with-dir", global = true, value_name = "NAME=PATH")]
    pub with_dir: Vec<String>,

    /// Install a package from its extracted sources before configuring
    #[arg(long, global = true, value_name = "NAME")]
    pub download: Vec<String>,

    /// Where a package's extracted sources live (NAME=PATH)
    #[arg(long = "package-dir", global = true, value_name = "NAME=PATH")]
    pub package_dir: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Locate, install and configure packages (default if no command specified)
    Configure(ConfigureArgs),

    /// Install a package from its extracted sources
    Install(InstallArgs),

    /// List known packages
    List(ListArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `configure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigureArgs {
    /// Packages to configure. With none given every known package is
    /// configured and any one that is not found fails the whole run
    pub packages: Vec<String>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write substitutions to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the configure transcript to this file
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Package to install
    pub package: String,

    /// Extracted source tree
    #[arg(short, long, value_name = "DIR")]
    pub source: PathBuf,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn configure_takes_package_list() {
        let cli = Cli::parse_from(["pkgprobe", "configure", "fiat", "triangle", "--json"]);
        match cli.command {
            Some(Commands::Configure(args)) => {
                assert_eq!(args.packages, vec!["fiat", "triangle"]);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn override_flags_are_global() {
        let cli = Cli::parse_from([
            "pkgprobe",
            "configure",
            "--download",
            "fiat",
            "--package-dir",
            "fiat=/tmp/fiat-0.9.9",
            "--with-dir",
            "scientificpython=/opt/sp",
            "--sudo",
            "sudo",
        ]);
        assert_eq!(cli.download, vec!["fiat"]);
        assert_eq!(cli.package_dir, vec!["fiat=/tmp/fiat-0.9.9"]);
        assert_eq!(cli.with_dir, vec!["scientificpython=/opt/sp"]);
        assert_eq!(cli.sudo.as_deref(), Some("sudo"));
    }

    #[test]
    fn install_requires_source() {
        assert!(Cli::try_parse_from(["pkgprobe", "install", "fiat"]).is_err());
        let cli = Cli::parse_from(["pkgprobe", "install", "fiat", "--source", "/src"]);
        assert!(matches!(cli.command, Some(Commands::Install(_))));
    }
}
