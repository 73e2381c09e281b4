//! apt wrappers: refresh the package cache and satisfy dependency specs.

use anyhow::Result;
use log::{info, warn};

use crate::runtime::{CommandSpec, Runtime};

/// One dependency specification, or several that apt should satisfy together.
///
/// Each entry uses apt's relation syntax, e.g. `python3 (>= 3.9)` or
/// `libpq5 | libpq-dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpec {
    Single(String),
    Many(Vec<String>),
}

impl PackageSpec {
    /// The single argument handed to `apt satisfy`. Entries of
    /// [`PackageSpec::Many`] are joined with `", "` in order.
    pub fn to_argument(&self) -> String {
        match self {
            PackageSpec::Single(spec) => spec.clone(),
            PackageSpec::Many(specs) => specs.join(", "),
        }
    }
}

impl From<&str> for PackageSpec {
    fn from(spec: &str) -> Self {
        PackageSpec::Single(spec.to_string())
    }
}

impl From<String> for PackageSpec {
    fn from(spec: String) -> Self {
        PackageSpec::Single(spec)
    }
}

impl From<Vec<String>> for PackageSpec {
    fn from(specs: Vec<String>) -> Self {
        PackageSpec::Many(specs)
    }
}

impl From<Vec<&str>> for PackageSpec {
    fn from(specs: Vec<&str>) -> Self {
        PackageSpec::Many(specs.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for PackageSpec {
    fn from(specs: &[&str]) -> Self {
        PackageSpec::Many(specs.iter().map(|s| s.to_string()).collect())
    }
}

/// Refresh the apt package cache (`apt-get update`).
#[tracing::instrument(skip(runtime))]
pub fn update_package_cache<R: Runtime>(runtime: &R) -> Result<()> {
    let command = CommandSpec::new("apt-get").arg("update");

    warn_if_unprivileged(runtime, &command);
    info!("Updating apt package cache...");

    runtime.run_command(&command)?.ensure_success(&command)?;
    Ok(())
}

/// Install whatever is needed to satisfy `packages` (`apt satisfy -y`),
/// without interactive prompts.
#[tracing::instrument(skip(runtime, packages))]
pub fn satisfy_packages<R: Runtime>(runtime: &R, packages: impl Into<PackageSpec>) -> Result<()> {
    let packages = packages.into();
    let command = CommandSpec::new("apt")
        .args(["satisfy", "-y"])
        .arg(packages.to_argument())
        .env("DEBIAN_FRONTEND", "noninteractive");

    warn_if_unprivileged(runtime, &command);
    info!("Satisfying package dependencies: {}", packages.to_argument());

    runtime.run_command(&command)?.ensure_success(&command)?;
    Ok(())
}

fn warn_if_unprivileged<R: Runtime>(runtime: &R, command: &CommandSpec) {
    if !runtime.is_privileged() {
        warn!(
            "Running `{}` without root privileges; apt will likely refuse.",
            command
        );
    }
}
