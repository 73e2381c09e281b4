//! Local account lookup.

use anyhow::Result;
use log::debug;

use crate::runtime::{CommandSpec, Runtime};

/// Returns true if `name` has an entry in the system account database.
///
/// Uses `getent passwd`, so NSS sources (LDAP, sssd) are honoured too. A
/// non-zero exit means the user is absent; only failing to run `getent` at
/// all is an error.
#[tracing::instrument(skip(runtime))]
pub fn user_exists<R: Runtime>(runtime: &R, name: &str) -> Result<bool> {
    let command = CommandSpec::new("getent").args(["passwd", name]);
    let output = runtime.run_command(&command)?;

    let exists = output.success();
    debug!("User {:?} exists: {}", name, exists);
    Ok(exists)
}
