//! Failures that callers may want to tell apart.
//!
//! Everything else travels as a plain `anyhow::Error` with context attached.
//! These variants are wrapped into `anyhow::Error` as well and can be
//! recovered with `downcast_ref::<DeployError>()`.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DeployError {
    /// An external command ran but exited unsuccessfully.
    #[error("Command `{command}` failed with {}{}", describe_status(.status), describe_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The release API answered with something other than 200.
    #[error("HTTP error {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// A release exists but carries no asset with the requested suffix.
    #[error("No asset with extension {extension} found for release {tag}")]
    AssetNotFound { extension: String, tag: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
