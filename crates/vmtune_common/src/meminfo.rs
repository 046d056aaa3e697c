//! Parser for /proc/meminfo

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VmTuneError};
use crate::kernel::{Kernel, KernelPaths};

/// One reading of the kernel's memory counters, in kB as reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub total: u64,
    pub free: u64,
    pub available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub swap_cached: u64,
}

#[derive(Clone, Copy)]
enum Field {
    Total,
    Free,
    Available,
    Buffers,
    Cached,
    SwapTotal,
    SwapFree,
    SwapCached,
}

/// Labels are matched against the start of the line, first match wins
const LABELS: [(&str, Field); 8] = [
    ("MemTotal:", Field::Total),
    ("MemFree:", Field::Free),
    ("MemAvailable:", Field::Available),
    ("Buffers:", Field::Buffers),
    ("Cached:", Field::Cached),
    ("SwapTotal:", Field::SwapTotal),
    ("SwapFree:", Field::SwapFree),
    ("SwapCached:", Field::SwapCached),
];

impl MemorySnapshot {
    fn slot(&mut self, field: Field) -> &mut u64 {
        match field {
            Field::Total => &mut self.total,
            Field::Free => &mut self.free,
            Field::Available => &mut self.available,
            Field::Buffers => &mut self.buffers,
            Field::Cached => &mut self.cached,
            Field::SwapTotal => &mut self.swap_total,
            Field::SwapFree => &mut self.swap_free,
            Field::SwapCached => &mut self.swap_cached,
        }
    }

    /// Memory in use (total - available), zero if available exceeds total
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }

    pub fn swap_used(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_free)
    }

    pub fn has_swap(&self) -> bool {
        self.swap_total > 0
    }

    /// Memory pressure as a percentage of total in use
    pub fn pressure(&self) -> f64 {
        ratio_percent(self.used(), self.total)
    }

    pub fn swap_usage(&self) -> f64 {
        ratio_percent(self.swap_used(), self.swap_total)
    }
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Parse /proc/meminfo text
///
/// Format:
/// ```text
/// MemTotal:       16384000 kB
/// MemFree:         8192000 kB
/// ```
///
/// Every non-digit character after a known label is dropped before parsing.
/// A known label with no digits (or too many) is an error, unknown lines are
/// skipped, and absent fields stay zero.
pub fn parse_meminfo(text: &str) -> Result<MemorySnapshot> {
    let mut snapshot = MemorySnapshot::default();

    for line in text.lines() {
        let Some((label, field, rest)) = LABELS
            .iter()
            .find_map(|(label, field)| line.strip_prefix(label).map(|rest| (*label, *field, rest)))
        else {
            continue;
        };

        let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
        let value = digits
            .parse::<u64>()
            .map_err(|_| VmTuneError::MalformedMeminfo {
                label: label.trim_end_matches(':').to_string(),
                line: line.to_string(),
            })?;

        *snapshot.slot(field) = value;
    }

    Ok(snapshot)
}

/// Read and parse the memory-info surface
pub fn read_snapshot<K: Kernel + ?Sized>(kernel: &K, paths: &KernelPaths) -> Result<MemorySnapshot> {
    let text = kernel
        .read_text(&paths.meminfo)
        .map_err(|source| VmTuneError::KernelRead {
            path: paths.meminfo.clone(),
            source,
        })?;
    let snapshot = parse_meminfo(&text)?;
    debug!(
        total = snapshot.total,
        available = snapshot.available,
        "read memory snapshot"
    );
    Ok(snapshot)
}
