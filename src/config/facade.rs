//! Config loading facade: one entry point per way of assembling a `CardConfig`.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::CardConfig;
use crate::error::CardError;
use config::File;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{AGENTCARD_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<CardConfig, CardError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);
        let config: CardConfig = builder.build()?.try_deserialize()?;
        Self::finish(config)
    }

    /// Load from `explicit` when given, otherwise from the workspace layers.
    pub fn load_for(
        workspace_root: &Path,
        explicit: Option<&Path>,
    ) -> Result<CardConfig, CardError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }

    /// Files `load_for` reads, lowest precedence first. Defaults and
    /// `AGENTCARD_*` variables are not listed.
    pub fn sources(workspace_root: &Path, explicit: Option<&Path>) -> Vec<PathBuf> {
        if let Some(path) = explicit {
            return vec![path.to_path_buf()];
        }
        global_file::global_config_path()
            .filter(|path| path.is_file())
            .into_iter()
            .chain(workspace_file::workspace_config_paths(workspace_root))
            .collect()
    }

    /// Load configuration from a single explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<CardConfig, CardError> {
        if !path.exists() {
            return Err(CardError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        let config: CardConfig = builder.build()?.try_deserialize()?;
        Self::finish(config)
    }

    fn finish(config: CardConfig) -> Result<CardConfig, CardError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            CardError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
