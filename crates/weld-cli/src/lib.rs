//! Weld CLI - merge a graph of CommonJS modules into one script.
//!
//! This crate is the command-line front end of [`weld_core`]. It layers
//! configuration from files, the environment and flags, reports progress
//! through `tracing` and renders failures as `miette` diagnostics.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `merge`, `graph` and `schema`
//! - [`config`] - `weld.config.json` loading and validation
//! - [`error`] - CLI error types and diagnostic conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages and summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use weld_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
