//! Tuning controller - one-shot writes to the vm control surfaces
//!
//! Every call is a single, stateless transaction with the kernel. No retries.

use tracing::{debug, warn};

use crate::error::{Result, VmTuneError};
use crate::kernel::{Kernel, KernelPaths};

/// drop_caches value meaning "page cache + dentries + inodes"
pub const DROP_ALL_CACHES: &str = "3";

/// compact_memory value that triggers compaction of all zones
pub const COMPACT_NOW: &str = "1";

pub const MAX_SWAPPINESS: u32 = 100;

pub struct TuningController<'k, K: Kernel + ?Sized> {
    kernel: &'k K,
    paths: &'k KernelPaths,
}

impl<'k, K: Kernel + ?Sized> TuningController<'k, K> {
    pub fn new(kernel: &'k K, paths: &'k KernelPaths) -> Self {
        Self { kernel, paths }
    }

    /// Flush dirty pages to disk
    pub fn sync(&self) {
        self.kernel.sync();
    }

    /// Ask the kernel to drop all reclaimable caches, then sync
    pub fn drop_caches(&self) -> Result<()> {
        self.kernel
            .write_text(&self.paths.drop_caches, DROP_ALL_CACHES)
            .map_err(|source| VmTuneError::KernelWrite {
                path: self.paths.drop_caches.clone(),
                source,
            })?;
        self.kernel.sync();
        debug!("page cache dropped");
        Ok(())
    }

    /// Best-effort memory compaction. Returns whether the request was accepted.
    pub fn compact_memory(&self) -> bool {
        match self
            .kernel
            .write_text(&self.paths.compact_memory, COMPACT_NOW)
        {
            Ok(()) => {
                debug!("memory compaction requested");
                true
            }
            Err(e) => {
                warn!(
                    "Cannot access {}: {}",
                    self.paths.compact_memory.display(),
                    e
                );
                false
            }
        }
    }

    pub fn set_swappiness(&self, value: u32) -> Result<()> {
        validate_swappiness(value)?;
        self.kernel
            .write_text(&self.paths.swappiness, &value.to_string())
            .map_err(|source| VmTuneError::KernelWrite {
                path: self.paths.swappiness.clone(),
                source,
            })?;
        debug!(value, "swappiness set");
        Ok(())
    }

    /// Current swappiness, or `None` when the surface is unreadable or garbled
    pub fn read_swappiness(&self) -> Option<u32> {
        match self.kernel.read_text(&self.paths.swappiness) {
            Ok(text) => text.split_whitespace().next()?.parse().ok(),
            Err(e) => {
                debug!("swappiness unavailable: {}", e);
                None
            }
        }
    }
}

pub fn validate_swappiness(value: u32) -> Result<()> {
    if value > MAX_SWAPPINESS {
        return Err(VmTuneError::InvalidSwappiness(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::InMemoryKernel;

    fn setup() -> (InMemoryKernel, KernelPaths) {
        let paths = KernelPaths::default();
        let kernel = InMemoryKernel::new().with_file(&paths.swappiness, "60\n");
        (kernel, paths)
    }

    #[test]
    fn test_drop_caches_writes_then_syncs() {
        let (kernel, paths) = setup();
        TuningController::new(&kernel, &paths).drop_caches().unwrap();

        assert_eq!(kernel.writes_to(&paths.drop_caches), vec!["3"]);
        assert_eq!(kernel.sync_count(), 1);
    }

    #[test]
    fn test_drop_caches_failure_is_hard() {
        let (kernel, paths) = setup();
        kernel.deny_write(&paths.drop_caches);

        let err = TuningController::new(&kernel, &paths).drop_caches().unwrap_err();
        assert!(matches!(err, VmTuneError::KernelWrite { .. }));
        assert_eq!(kernel.sync_count(), 0);
    }

    #[test]
    fn test_compact_memory_is_best_effort() {
        let (kernel, paths) = setup();
        let tuning = TuningController::new(&kernel, &paths);
        assert!(tuning.compact_memory());
        assert_eq!(kernel.writes_to(&paths.compact_memory), vec!["1"]);

        kernel.deny_write(&paths.compact_memory);
        assert!(!tuning.compact_memory());
    }

    #[test]
    fn test_swappiness_roundtrip() {
        let (kernel, paths) = setup();
        let tuning = TuningController::new(&kernel, &paths);
        assert_eq!(tuning.read_swappiness(), Some(60));

        tuning.set_swappiness(10).unwrap();
        assert_eq!(tuning.read_swappiness(), Some(10));
    }

    #[test]
    fn test_swappiness_out_of_range_never_written() {
        let (kernel, paths) = setup();
        let tuning = TuningController::new(&kernel, &paths);

        assert!(matches!(
            tuning.set_swappiness(101),
            Err(VmTuneError::InvalidSwappiness(101))
        ));
        assert!(kernel.writes().is_empty());
        assert!(tuning.set_swappiness(100).is_ok());
        assert!(tuning.set_swappiness(0).is_ok());
    }

    #[test]
    fn test_swappiness_unknown() {
        let (kernel, paths) = setup();
        kernel.deny_read(&paths.swappiness);
        assert_eq!(TuningController::new(&kernel, &paths).read_swappiness(), None);

        let garbled = InMemoryKernel::new().with_file(&paths.swappiness, "abc");
        assert_eq!(TuningController::new(&garbled, &paths).read_swappiness(), None);
    }

    #[test]
    fn test_set_swappiness_write_failure() {
        let (kernel, paths) = setup();
        kernel.deny_write(&paths.swappiness);
        assert!(TuningController::new(&kernel, &paths)
            .set_swappiness(60)
            .is_err());
    }
}
