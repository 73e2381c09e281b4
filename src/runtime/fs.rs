//! File creation for downloaded archives.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::RealRuntime;

/// Prefix for generated download files.
const TEMP_FILE_PREFIX: &str = "paperless-deploy-";

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        let file = std::fs::File::create(path).context("Failed to create file")?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_temp_file_impl(
        &self,
        suffix: &str,
    ) -> Result<(PathBuf, Box<dyn Write + Send>)> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(suffix)
            .tempfile()
            .context("Failed to create temporary file")?;

        let (file, path) = temp
            .keep()
            .context("Failed to persist temporary file")?;

        Ok((path, Box::new(file)))
    }
}
