//! CPU architecture probe.
//!
//! Paperless-ngx ships different dependency sets for ARM hosts, so the
//! deployment tooling only needs a coarse "is this ARM?" answer.
//! Debian reports `arm64`, `armel`, `armhf`; Ubuntu kernels also report
//! `aarch64`, `aarch32`. Anything else is treated as non-ARM.

use log::debug;
use std::fmt;

use crate::runtime::Runtime;

/// Returns true if the machine string names an ARM architecture.
pub fn is_arm_machine(machine: &str) -> bool {
    let machine = machine.to_lowercase();
    machine.starts_with("arm") || machine.starts_with("aarch")
}

/// Returns true if the host CPU is ARM based.
#[tracing::instrument(skip(runtime))]
pub fn is_arm<R: Runtime>(runtime: &R) -> bool {
    Arch::detect(runtime) == Arch::Arm
}

/// Coarse architecture family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm,
    Other,
}

impl Arch {
    /// Classify a raw machine string.
    pub fn from_machine(machine: &str) -> Self {
        if is_arm_machine(machine) {
            Arch::Arm
        } else {
            Arch::Other
        }
    }

    /// Detect the host family. An unreadable machine string counts as [`Arch::Other`].
    pub fn detect<R: Runtime>(runtime: &R) -> Self {
        let machine = runtime.machine().unwrap_or_default();
        debug!("Machine architecture: {:?}", machine);
        Self::from_machine(&machine)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::Arm => write!(f, "arm"),
            Arch::Other => write!(f, "other"),
        }
    }
}
