//! Shared test utilities for integration tests
//!
//! Provides centralized setup for XDG directories, sample profiles and picture
//! files so tests stay isolated from the developer's real configuration.

use agentcard::agent::{AgentProfile, MetricList, SkillList};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
/// This prevents race conditions when tests run in parallel
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 5] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "XDG_STATE_HOME",
    "AGENTCARD_ENV",
];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and the XDG base directories pointed into `test_dir`.
///
/// The config home is `test_dir` itself, so the global config file lives at
/// `test_dir/agentcard/config.toml`. The original environment is restored
/// afterwards, and a global mutex keeps parallel tests from interleaving.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_data_home = test_dir.path().join("data");
    let test_state_home = test_dir.path().join("state");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_data_home).unwrap();
    std::fs::create_dir_all(&test_state_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    std::env::set_var("XDG_DATA_HOME", &test_data_home);
    std::env::set_var("XDG_STATE_HOME", &test_state_home);
    std::env::remove_var("AGENTCARD_ENV");

    let result = f();

    env_state.restore();

    result
}

/// Command for the `agentcard` binary with every user directory inside `test_dir`
/// and no logging overrides inherited from the caller.
pub fn agentcard_command(test_dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_agentcard"));
    command
        .env("HOME", test_dir.join("home"))
        .env("XDG_CONFIG_HOME", test_dir.join("config"))
        .env("XDG_DATA_HOME", test_dir.join("data"))
        .env("XDG_STATE_HOME", test_dir.join("state"))
        .env_remove("AGENTCARD_ENV")
        .env_remove("AGENTCARD_LOG")
        .env_remove("AGENTCARD_LOG_FORMAT")
        .env_remove("AGENTCARD_LOG_OUTPUT")
        .env_remove("AGENTCARD_LOG_MODULES");
    command
}

/// The reference profile: two skills, one metric, no picture, both buttons on.
pub fn ada_profile() -> AgentProfile {
    AgentProfile {
        name: "Ada Lovelace".to_string(),
        description: "Analyzes data".to_string(),
        skills: SkillList::with_items(["Search", "Summarize"]).unwrap(),
        metrics: MetricList::with_items(["30 percent faster"]).unwrap(),
        image: None,
        show_details: true,
        show_execute: true,
    }
}

/// Write a single-colour PNG and return its path.
pub fn write_solid_png(dir: &Path, name: &str, width: u32, height: u32, color: Rgb<u8>) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, color).save(&path).unwrap();
    path
}
