//! Library surface of the `tabprep` binary, exposed for integration tests.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
