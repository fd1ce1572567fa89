//! Poker sheet CLI library.
//!
//! This crate provides the CLI interface and the sheet and summary writers.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, OnMalformed};
pub use config::Config;
