//! vmtunectl library - exposes modules for the binary and integration tests

pub mod app;
pub mod cli;
pub mod display;
pub mod errors;
pub mod logging;
pub mod monitor;
pub mod privilege;
pub mod workflows;
