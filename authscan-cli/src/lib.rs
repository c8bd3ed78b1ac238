//! authscan CLI library
//!
//! Argument parsing, command handlers and output rendering for the
//! `authscan` binary. Exposed as a library so the handlers can be
//! exercised from integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
