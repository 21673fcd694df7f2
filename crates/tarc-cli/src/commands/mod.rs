//! Subcommand implementations.

pub mod archive;
pub mod completion;
pub mod extract;
