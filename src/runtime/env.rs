//! Environment and system information operations.

use std::env;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn machine_impl(&self) -> Option<String> {
        #[cfg(unix)]
        return nix::sys::utsname::uname()
            .ok()
            .map(|uts| uts.machine().to_string_lossy().into_owned());

        #[cfg(not(unix))]
        return Some(env::consts::ARCH.to_string());
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_privileged_impl(&self) -> bool {
        #[cfg(unix)]
        return nix::unistd::geteuid().is_root();

        #[cfg(not(unix))]
        return false;
    }
}
