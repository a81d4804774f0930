//! Integration tests for agent card editing, composition and export

mod config_integration;
mod image_fitter;
mod render_cli;
mod test_utils;

pub use test_utils::{ada_profile, agentcard_command, with_xdg_env, write_solid_png};
