//! vmtune Common - Shared types for reading and tuning Linux virtual memory
//!
//! Everything here talks to the kernel through the [`Kernel`] trait, so the
//! same code runs against procfs in production and an in-memory fake in tests.

pub mod config;
pub mod error;
pub mod format;
pub mod kernel;
pub mod meminfo;
pub mod pressure;
pub mod tuning;

pub use config::*;
pub use error::*;
pub use format::*;
pub use kernel::*;
pub use meminfo::*;
pub use pressure::*;
pub use tuning::*;
