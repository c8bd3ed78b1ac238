//! Command handlers -- one module per subcommand

pub mod classify;
pub mod config;
pub mod rules;
pub mod scan;
