//! Workspace config files: `config/config.toml`, then `config/{AGENTCARD_ENV}.toml`.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::{Path, PathBuf};

/// Environment profile used when `AGENTCARD_ENV` is unset.
pub const DEFAULT_ENV: &str = "development";

/// Active environment profile name.
pub fn env_name() -> String {
    std::env::var("AGENTCARD_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string())
}

/// Workspace config files that exist on disk, lowest precedence first.
pub fn workspace_config_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name())),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    workspace_config_paths(workspace_root)
        .iter()
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path.as_path()).required(true))
        })
}
