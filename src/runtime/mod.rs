//! Runtime abstraction for system operations.
//!
//! Everything this crate does to the host (reading the environment, sniffing
//! the machine, creating files, spawning commands) goes through the
//! [`Runtime`] trait so the probes and the fetcher can be tested against a
//! mock.
//!
//! # Structure
//!
//! - `env` - Environment variables and system information
//! - `fs` - File creation (explicit paths and persisted temporary files)
//! - `process` - External command execution with structured results

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use process::{CommandOutput, CommandSpec};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    /// Machine hardware name as reported by the kernel (`uname -m`).
    /// Returns `None` when it cannot be determined.
    fn machine(&self) -> Option<String>;

    // Privilege
    fn is_privileged(&self) -> bool;

    // File System
    /// Create (or truncate) the file at `path` for writing.
    fn create_file(&self, path: &Path) -> Result<Box<dyn Write + Send>>;

    /// Create a new uniquely named file in the system temp directory whose
    /// name ends with `suffix`. The file is kept on disk after the writer is
    /// dropped; removing it is up to the caller.
    fn create_temp_file(&self, suffix: &str) -> Result<(PathBuf, Box<dyn Write + Send>)>;

    // Processes
    /// Run a command to completion, capturing its output.
    /// A non-zero exit is reported in the returned [`CommandOutput`], not as an error.
    fn run_command(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn machine(&self) -> Option<String> {
        self.machine_impl()
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        self.create_file_impl(path)
    }

    fn create_temp_file(&self, suffix: &str) -> Result<(PathBuf, Box<dyn Write + Send>)> {
        self.create_temp_file_impl(suffix)
    }

    fn run_command(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.run_command_impl(command)
    }
}
