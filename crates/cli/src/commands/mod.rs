//! Subcommand implementations for the Clementine CLI.

pub mod check;
pub mod query;
pub mod tree;
pub mod validate;
