//! Clinic Console - command-line admin console for the clinic API
//!
//! This crate wires the infrastructure adapters into the application
//! services and exposes them as `clinic` subcommands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod logging;
pub mod render;

pub use cli::Cli;
pub use config::ConsoleConfig;
pub use context::Console;
