//! CLI module
//!
//! Command-line driver for the stores.
//!
//! # Commands
//!
//! - `resources` - List configured resources
//! - `list` - Fetch a page of a resource, optionally loading more
//! - `recent` - Show the most recent testimonials
//! - `project` - Show one project

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
