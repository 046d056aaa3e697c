//! Kernel interface - the procfs surfaces vmtune reads and writes
//!
//! [`Kernel`] is the only way the rest of the crate touches the system.
//! [`ProcFs`] talks to the real pseudo-files; [`InMemoryKernel`] is a
//! recording fake used by tests and dry runs.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MEMINFO_PATH: &str = "/proc/meminfo";
pub const DROP_CACHES_PATH: &str = "/proc/sys/vm/drop_caches";
pub const COMPACT_MEMORY_PATH: &str = "/proc/sys/vm/compact_memory";
pub const SWAPPINESS_PATH: &str = "/proc/sys/vm/swappiness";

/// Text-level access to kernel pseudo-files
pub trait Kernel {
    /// Read the whole surface as text
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Write a single value to a control surface
    fn write_text(&self, path: &Path, value: &str) -> io::Result<()>;

    /// Flush dirty filesystem buffers (sync(2))
    fn sync(&self);
}

/// Locations of the surfaces, overridable from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelPaths {
    pub meminfo: PathBuf,
    pub drop_caches: PathBuf,
    pub compact_memory: PathBuf,
    pub swappiness: PathBuf,
}

impl Default for KernelPaths {
    fn default() -> Self {
        Self {
            meminfo: PathBuf::from(MEMINFO_PATH),
            drop_caches: PathBuf::from(DROP_CACHES_PATH),
            compact_memory: PathBuf::from(COMPACT_MEMORY_PATH),
            swappiness: PathBuf::from(SWAPPINESS_PATH),
        }
    }
}

/// The real kernel, via /proc
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcFs;

impl Kernel for ProcFs {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, value: &str) -> io::Result<()> {
        // Never create: a missing control file means the kernel lacks the feature.
        let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
        writeln!(file, "{}", value)?;
        debug!("wrote '{}' to {}", value, path.display());
        Ok(())
    }

    fn sync(&self) {
        nix::unistd::sync();
    }
}

/// In-memory kernel that records every interaction
#[derive(Debug, Default)]
pub struct InMemoryKernel {
    files: RefCell<HashMap<PathBuf, String>>,
    queued_reads: RefCell<HashMap<PathBuf, VecDeque<String>>>,
    unreadable: RefCell<HashSet<PathBuf>>,
    unwritable: RefCell<HashSet<PathBuf>>,
    writes: RefCell<Vec<(PathBuf, String)>>,
    syncs: Cell<usize>,
}

impl InMemoryKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a surface with content
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.set_file(path, content);
        self
    }

    pub fn set_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// Queue content returned by the next read of `path`, ahead of the stored file
    pub fn queue_read(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.queued_reads
            .borrow_mut()
            .entry(path.into())
            .or_default()
            .push_back(content.into());
    }

    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.unreadable.borrow_mut().insert(path.into());
    }

    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.unwritable.borrow_mut().insert(path.into());
    }

    /// Every successful write, in order
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.borrow().clone()
    }

    /// Values written to one surface, in order
    pub fn writes_to(&self, path: &Path) -> Vec<String> {
        self.writes
            .borrow()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn sync_count(&self) -> usize {
        self.syncs.get()
    }
}

impl Kernel for InMemoryKernel {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.borrow().contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if let Some(queue) = self.queued_reads.borrow_mut().get_mut(path) {
            if let Some(content) = queue.pop_front() {
                return Ok(content);
            }
        }
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write_text(&self, path: &Path, value: &str) -> io::Result<()> {
        if self.unwritable.borrow().contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), value.to_string());
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), value.to_string()));
        Ok(())
    }

    fn sync(&self) {
        self.syncs.set(self.syncs.get() + 1);
    }
}
