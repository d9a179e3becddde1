//! `mealbrowse`: a thin terminal front end over `meal-engine`.

pub mod cli;
mod commands;
pub mod config;
pub mod render;
pub mod watch;

pub use cli::Cli;
pub use commands::run;
