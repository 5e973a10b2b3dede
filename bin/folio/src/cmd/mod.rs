//! Command implementations.

pub mod check;
pub mod list;
pub mod new;
pub mod serve;
pub mod show;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

/// Load configuration (file plus `FOLIO__*` environment), then apply the
/// command-line content root override.
pub fn load_config(path: &Path, content_root: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(root) = content_root {
        config.content.root = root.to_path_buf();
    }

    tracing::debug!(root = %config.content.root.display(), "configuration loaded");
    Ok(config)
}
