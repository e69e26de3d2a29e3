//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name recorded on log events (e.g. "show", "get").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show { .. } => "show",
        Commands::Get { .. } => "get",
        Commands::Coerce { .. } => "coerce",
    }
}
