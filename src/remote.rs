//! Shallow clones of remote skill repositories into scoped temp directories.

use crate::GatherError;
use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Default time a clone may take before the `git` process is killed.
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 120;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Returns true if `value` looks like something `git clone` should fetch
/// rather than a local path: `http(s)://` URLs and `git@host:` addresses.
pub fn is_remote_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://") || value.starts_with("git@")
}

/// A checked-out repository. The checkout is deleted when this is dropped.
pub struct ClonedRepo {
    url: String,
    temp_dir: TempDir,
}

impl ClonedRepo {
    /// Root of the checkout.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The URL the checkout was cloned from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Runs `git clone` with hooks disabled, depth 1 and a hard timeout.
#[derive(Debug, Clone)]
pub struct GitCloner {
    /// Program invoked as `git`
    git_program: OsString,
    /// Clone timeout in seconds
    timeout_secs: u64,
    /// Parent of the checkout directory; the system temp dir if unset
    temp_root: Option<PathBuf>,
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCloner {
    pub fn new() -> Self {
        Self {
            git_program: OsString::from("git"),
            timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
            temp_root: None,
        }
    }

    /// Use a specific `git` executable instead of the one on `PATH`
    pub fn with_git_program(mut self, program: impl Into<OsString>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Set clone timeout in seconds
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Create checkouts under `dir` instead of the system temp dir
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    /// Clone `url` into a fresh temporary directory.
    ///
    /// On any error the temporary directory is removed before returning.
    pub fn fetch(&self, url: &str) -> Result<ClonedRepo, GatherError> {
        self.check_git_available()?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("skill-review-");
        let temp_dir = match &self.temp_root {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
        .map_err(GatherError::TempDir)?;

        #[cfg(feature = "logging")]
        tracing::debug!("Cloning {} into {}", url, temp_dir.path().display());
        self.execute_clone(url, temp_dir.path())?;
        #[cfg(feature = "logging")]
        tracing::debug!("Clone of {} finished", url);

        Ok(ClonedRepo {
            url: url.to_string(),
            temp_dir,
        })
    }

    fn check_git_available(&self) -> Result<(), GatherError> {
        Command::new(&self.git_program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| GatherError::GitNotFound)?;
        Ok(())
    }

    fn execute_clone(&self, url: &str, dest: &Path) -> Result<(), GatherError> {
        // stderr goes to an unnamed file so a chatty git never blocks on a full pipe
        let mut stderr_file = tempfile::tempfile().map_err(GatherError::TempDir)?;
        let stderr_handle = stderr_file.try_clone().map_err(GatherError::TempDir)?;

        let mut cmd = Command::new(&self.git_program);
        cmd.env("GIT_TEMPLATE_DIR", "")
            .env("GIT_TERMINAL_PROMPT", "0")
            .args(["clone", "--depth", "1", "--config", "core.hooksPath=/dev/null", "--"])
            .arg(url)
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_handle));

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GatherError::GitNotFound,
            _ => GatherError::CloneFailed {
                url: url.to_string(),
                message: e.to_string(),
            },
        })?;

        let deadline = Instant::now() + Duration::from_secs(self.timeout_secs);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(GatherError::CloneTimeout {
                        url: url.to_string(),
                        timeout_secs: self.timeout_secs,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(GatherError::CloneFailed {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        };

        if !status.success() {
            return Err(GatherError::CloneFailed {
                url: url.to_string(),
                message: read_stderr(&mut stderr_file),
            });
        }
        Ok(())
    }
}

fn read_stderr(file: &mut File) -> String {
    let mut stderr = String::new();
    if file.seek(SeekFrom::Start(0)).is_ok() {
        let mut bytes = Vec::new();
        let _ = file.read_to_end(&mut bytes);
        stderr = String::from_utf8_lossy(&bytes).into_owned();
    }
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "git exited with a non-zero status".to_string()
    } else {
        trimmed.to_string()
    }
}
