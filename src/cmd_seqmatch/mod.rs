//! Subcommand modules for the `seqmatch` binary.

pub mod best;
pub mod lcs;
pub mod local;
pub mod matrix;
