//! Error types for vmtune.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmTuneError {
    #[error("Cannot read {}: {source}", path.display())]
    KernelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write to {}: {source} (try running with sudo)", path.display())]
    KernelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed meminfo value for {label} in line '{line}'")]
    MalformedMeminfo { label: String, line: String },

    #[error("Invalid swappiness {0}: expected a value between 0 and 100")]
    InvalidSwappiness(u32),

    #[error("This operation requires root privileges: {action}")]
    PermissionDenied { action: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VmTuneError>;
