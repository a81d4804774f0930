//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log spans (e.g. "render", "validate.field").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Render { .. } => "render".to_string(),
        Commands::Preview { .. } => "preview".to_string(),
        Commands::Validate { field: Some(_), .. } => "validate.field".to_string(),
        Commands::Validate { .. } => "validate.profile".to_string(),
        Commands::New { .. } => "new".to_string(),
    }
}
