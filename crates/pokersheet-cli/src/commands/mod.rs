//! CLI subcommand implementations.

pub mod sheet;
pub mod summary;
pub mod util;
