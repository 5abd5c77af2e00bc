//! Glue between the CLI and the SEF library crates.
//!
//! This module loads datasets and prepares analysis sessions for the
//! command handlers in `main.rs`.

pub(crate) mod data_pipeline;
