//! CBo library interface for the binary and integration tests

#![warn(rust_2024_compatibility, clippy::all)]
#![allow(clippy::needless_pass_by_value, clippy::missing_errors_doc)]

pub mod cli;
pub mod config;
pub mod files;
pub mod lint;
pub mod output;
