//! CLI domain: parse, route, help, output, and presentation only.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, SourceArgs};
pub use presentation::{flatten_tree, format_coercion, format_tree, format_value};
pub use route::RunContext;
