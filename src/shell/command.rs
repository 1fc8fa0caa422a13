//! Shell command execution.

use crate::error::{ProbeError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Timeout in seconds (None = no timeout).
    pub timeout: Option<u64>,
}

/// Execute a shell command, capturing stdout and stderr.
///
/// When `options.timeout` is set the child and every process it spawned
/// are killed once the deadline passes and [`ProbeError::CommandTimedOut`] is returned. A non-zero exit
/// is not an error here; callers inspect [`CommandResult::success`].
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let (program, flag) = shell_program();

    let mut cmd = Command::new(program);
    cmd.arg(flag).arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // The shell leads its own process group so a timeout can stop
    // everything it spawned, not just the shell.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    tracing::debug!(command, timeout = ?options.timeout, "executing shell command");

    let mut child = cmd.spawn().map_err(|_| ProbeError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    // Drain both pipes on their own threads so a chatty child can't block
    // on a full pipe while we wait on it.
    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);

    let status = match options.timeout {
        Some(seconds) => wait_with_deadline(&mut child, command, seconds)?,
        None => child.wait().map_err(|_| ProbeError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?,
    };

    let stdout = join_reader(stdout_handle);
    let stderr = join_reader(stderr_handle);
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(command, code = ?status.code(), "shell command failed");
        Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command and collect output without a timeout.
pub fn execute_quiet(command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        ..Default::default()
    };
    execute(command, &options)
}

fn wait_with_deadline(
    child: &mut Child,
    command: &str,
    seconds: u64,
) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + Duration::from_secs(seconds);
    loop {
        match child.try_wait()? {
            Some(status) => return Ok(status),
            None if Instant::now() >= deadline => {
                tracing::warn!(command, seconds, "shell command timed out, killing");
                kill_process_group(child);
                return Err(ProbeError::CommandTimedOut {
                    command: command.to_string(),
                    seconds,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

/// Kill the child's whole process group, then reap the child.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    {
        let pgid = child.id() as libc::pid_t;
        // SAFETY: killpg only sends a signal; the group was created at spawn.
        unsafe {
            libc::killpg(pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// The shell used to run composite commands.
///
/// Install commands are chained with `&&`, so a POSIX shell is used rather
/// than the user's login shell.
fn shell_program() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("/bin/sh", "-c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3", &CommandOptions::default()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_captures_stderr() {
        let result = execute("echo oops >&2", &CommandOptions::default()).unwrap();
        assert!(result.stderr.contains("oops"));
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions::default();
        options
            .env
            .insert("PROBE_VAR".to_string(), "probe_value".to_string());

        let result = execute("echo $PROBE_VAR", &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("probe_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let result = execute("ls", &options).unwrap();

        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn execute_within_timeout_succeeds() {
        let options = CommandOptions {
            timeout: Some(30),
            ..Default::default()
        };
        let result = execute("echo quick", &options).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("quick"));
    }

    #[test]
    fn execute_past_timeout_is_killed() {
        let options = CommandOptions {
            timeout: Some(1),
            ..Default::default()
        };
        let started = Instant::now();
        let err = execute("sleep 30", &options).unwrap_err();

        assert!(matches!(err, ProbeError::CommandTimedOut { seconds: 1, .. }));
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_stops_grandchildren() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            timeout: Some(1),
            ..Default::default()
        };

        // `true &&` keeps the outer shell from exec-ing into the inner one.
        let err = execute("true && sh -c 'sleep 2; touch marker'", &options).unwrap_err();
        assert!(matches!(err, ProbeError::CommandTimedOut { .. }));

        thread::sleep(Duration::from_secs(3));
        assert!(!temp.path().join("marker").exists());
    }

    #[test]
    fn execute_quiet_captures_silently() {
        let result = execute_quiet("echo hello", None).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("hello"));
    }
}
