//! Library side of the `chanmap` binary: arguments, configuration, logging
//! and the command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
