//! Agentcard: agent profile cards
//!
//! Fill in an agent profile (name, description, skills, metrics, picture and
//! two button toggles), validate it field by field, and compose it into a
//! fixed-layout card image that can be exported as PNG.

pub mod agent;
pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
