//! Interpreter version detection for the alternate library layout.

use regex::Regex;

use crate::shell::execute_quiet;

/// Used when no interpreter can be queried.
pub const FALLBACK_PYTHON_VERSION: &str = "3";

/// Extract `major.minor` from `python --version` output.
pub fn parse_python_version(output: &str) -> Option<String> {
    let re = Regex::new(r"Python\s+(\d+)\.(\d+)").ok()?;
    let caps = re.captures(output)?;
    Some(format!("{}.{}", &caps[1], &caps[2]))
}

/// Ask `python3` (then `python`) for its version.
pub fn detect_python_version() -> Option<String> {
    for interpreter in ["python3", "python"] {
        let Ok(result) = execute_quiet(&format!("{} --version", interpreter), None) else {
            continue;
        };
        if !result.success {
            continue;
        }
        // Older interpreters print the version on stderr.
        let combined = format!("{}{}", result.stdout, result.stderr);
        if let Some(version) = parse_python_version(&combined) {
            tracing::debug!(interpreter, %version, "detected python version");
            return Some(version);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        assert_eq!(
            parse_python_version("Python 3.11.4\n"),
            Some("3.11".to_string())
        );
    }

    #[test]
    fn parses_legacy_stderr_format() {
        assert_eq!(parse_python_version("Python 2.7.18"), Some("2.7".to_string()));
    }

    #[test]
    fn rejects_unrelated_output() {
        assert_eq!(parse_python_version("command not found"), None);
    }
}
