//! Subcommand modules for the `shoot` binary.

pub mod clean;
pub mod narrow;
pub mod orthologs;
pub mod split;
pub mod split_db;
