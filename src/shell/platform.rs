//! Host platform queries.

use std::path::Path;

/// Broad operating-system class used to gate package installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsClass {
    MacOS,
    Linux,
    Windows,
}

impl OsClass {
    /// Detect the current OS class.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            OsClass::MacOS
        } else if cfg!(target_os = "windows") {
            OsClass::Windows
        } else {
            OsClass::Linux
        }
    }
}

impl std::fmt::Display for OsClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OsClass::MacOS => "macos",
            OsClass::Linux => "linux",
            OsClass::Windows => "windows",
        };
        write!(f, "{}", name)
    }
}

/// Check if running in a CI environment.
///
/// Used by `main()` to suppress spinners. Checks common CI environment
/// variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`,
/// `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

/// Whether the current user can create entries under `dir`.
///
/// Walks up to the nearest existing ancestor, since the install root
/// itself is usually created on demand.
pub fn is_writable(dir: &Path) -> bool {
    let Some(existing) = dir.ancestors().find(|p| p.exists()) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let Ok(c_path) = CString::new(existing.as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: c_path is a valid NUL-terminated string for the call's duration
        unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(existing)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }
}
