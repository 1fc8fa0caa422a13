//! Configure log.
//!
//! An append-only transcript of what each package checked. Lines are kept
//! in memory so a run can be inspected or saved, and mirrored to `tracing`
//! at debug level.

use std::fs;
use std::path::Path;

use crate::error::Result;

const RULE: &str =
    "==================================================================================";

/// Append-only configure transcript.
#[derive(Debug, Clone, Default)]
pub struct ConfigureLog {
    lines: Vec<String>,
}

impl ConfigureLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw line.
    pub fn write(&mut self, line: &str) {
        tracing::debug!("{}", line);
        self.lines.push(line.to_string());
    }

    /// Append a diagnostic message.
    pub fn log_print(&mut self, msg: &str) {
        self.write(msg);
    }

    /// Append a message framed by horizontal rules.
    pub fn log_print_box(&mut self, msg: &str) {
        self.write(RULE);
        self.write(msg);
        self.write(RULE);
    }

    /// Append a section separator.
    pub fn rule(&mut self) {
        self.write(RULE);
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Write the transcript to `path`, one line per entry.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lines_are_kept_in_order() {
        let mut log = ConfigureLog::new();
        log.log_print("first");
        log.log_print("second");
        assert_eq!(log.lines(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn box_frames_message() {
        let mut log = ConfigureLog::new();
        log.log_print_box("Installing FIAT");
        assert_eq!(log.lines().len(), 3);
        assert_eq!(log.lines()[1], "Installing FIAT");
        assert!(log.lines()[0].chars().all(|c| c == '='));
    }

    #[test]
    fn save_writes_transcript() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("configure.log");
        let mut log = ConfigureLog::new();
        log.log_print("Checking location here");

        log.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Checking location here\n");
    }
}
