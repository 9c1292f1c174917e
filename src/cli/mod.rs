//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `whoami` - Show the authenticated app and token
//! - `descriptors` - Search threat descriptors
//! - `indicators` - Search threat indicators
//! - `tags` - Search threat tags
//! - `members` - List ThreatExchange members
//! - `updates` - Fetch a privacy group's updates

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
