//! Outcome of a configure run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{Action, ConfigureContext, FoundPackage};
use crate::error::Result;

/// Everything a configure run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureReport {
    /// Packages in the order they were configured.
    pub order: Vec<String>,
    /// Packages that passed verification.
    pub found: Vec<FoundPackage>,
    /// Install actions.
    pub actions: Vec<Action>,
    /// Substitution tokens.
    pub substitutions: BTreeMap<String, String>,
    /// Define tokens.
    pub defines: BTreeMap<String, String>,
    /// Directories probed, most recent first.
    pub search_path: Vec<PathBuf>,
}

impl ConfigureReport {
    /// Snapshot the context after a run over `order`.
    pub fn from_context(order: Vec<String>, ctx: &ConfigureContext) -> Self {
        Self {
            order,
            found: ctx.packages().to_vec(),
            actions: ctx.actions.entries().to_vec(),
            substitutions: ctx.substitutions().clone(),
            defines: ctx.defines().clone(),
            search_path: ctx.search_path().to_vec(),
        }
    }

    /// Substitutions as `NAME = value` lines, sorted by name.
    pub fn substitution_lines(&self) -> String {
        self.substitutions
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    format!("{} =\n", name)
                } else {
                    format!("{} = {}\n", name, value)
                }
            })
            .collect()
    }

    /// Write [`substitution_lines`](Self::substitution_lines) to `path`.
    pub fn write_substitutions(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.substitution_lines())?;
        tracing::info!(path = %path.display(), count = self.substitutions.len(), "wrote substitutions");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report() -> ConfigureReport {
        let mut substitutions = BTreeMap::new();
        substitutions.insert("TRIANGLE_LIB".to_string(), String::new());
        substitutions.insert("FIAT_DIR".to_string(), "/opt/fiat".to_string());
        substitutions.insert("TRIANGLE_INCLUDE".to_string(), String::new());
        ConfigureReport {
            order: vec![],
            found: vec![],
            actions: vec![],
            substitutions,
            defines: BTreeMap::new(),
            search_path: vec![],
        }
    }

    #[test]
    fn lines_are_sorted_by_name() {
        assert_eq!(
            report().substitution_lines(),
            "FIAT_DIR = /opt/fiat\nTRIANGLE_INCLUDE =\nTRIANGLE_LIB =\n"
        );
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf").join("packages.conf");

        report().write_substitutions(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("FIAT_DIR = /opt/fiat\n"));
    }
}
