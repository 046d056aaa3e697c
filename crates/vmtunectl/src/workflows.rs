//! Optimization and tuning profiles
//!
//! Each workflow is a fixed sequence. Hard failures abort with `?`, the
//! compaction step is the only best-effort one.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tracing::info;

use vmtune_common::{Kernel, MemorySnapshot};

use crate::app::App;
use crate::display::render_optimize_result;

/// What an optimization pass observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizeOutcome {
    pub before: MemorySnapshot,
    pub after: MemorySnapshot,
    /// `None` for a standard pass, otherwise whether compaction was accepted
    pub compacted: Option<bool>,
}

/// Give the kernel time to act. There is no completion signal to wait on.
async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// sync, drop caches, optionally compact, then report the change in available memory
pub async fn optimize<K, W>(app: &App<'_, K>, out: &mut W, aggressive: bool) -> Result<OptimizeOutcome>
where
    K: Kernel + ?Sized,
    W: Write,
{
    let theme = app.theme();
    let tuning = app.tuning();
    let delay = app.settle_delay();

    writeln!(out, "{}", theme.warn("Starting memory optimization..."))?;
    writeln!(out)?;

    let before = app.snapshot()?;

    writeln!(out, "Step 1: Syncing filesystem...")?;
    tuning.sync();

    writeln!(out, "Step 2: Dropping page cache...")?;
    tuning.drop_caches()?;
    settle(delay).await;

    let compacted = if aggressive {
        writeln!(out, "Step 3: Compacting memory...")?;
        let accepted = tuning.compact_memory();
        settle(delay).await;
        Some(accepted)
    } else {
        None
    };

    let after = app.snapshot()?;
    render_optimize_result(out, theme, &before, &after)?;

    info!(
        before = before.available,
        after = after.available,
        aggressive,
        "optimization finished"
    );
    Ok(OptimizeOutcome {
        before,
        after,
        compacted,
    })
}

/// Low swappiness keeps the working set resident, then frees cache for it
pub fn gaming_profile<K, W>(app: &App<'_, K>, out: &mut W) -> Result<()>
where
    K: Kernel + ?Sized,
    W: Write,
{
    let theme = app.theme();
    let tuning = app.tuning();
    let swappiness = app.config().tuning.gaming_swappiness;

    writeln!(out, "{}", theme.warn("Tuning for gaming performance..."))?;
    writeln!(out)?;

    writeln!(out, "Setting swappiness to {}...", swappiness)?;
    tuning.set_swappiness(swappiness)?;

    writeln!(out, "Freeing cached memory...")?;
    tuning.drop_caches()?;

    writeln!(out)?;
    writeln!(out, "{}", theme.success("Gaming mode activated!"))?;
    writeln!(out, "System optimized for low latency and high responsiveness")?;
    Ok(())
}

/// Balanced swappiness for general use
pub fn desktop_profile<K, W>(app: &App<'_, K>, out: &mut W) -> Result<()>
where
    K: Kernel + ?Sized,
    W: Write,
{
    let theme = app.theme();
    let swappiness = app.config().tuning.desktop_swappiness;

    writeln!(out, "{}", theme.warn("Tuning for desktop usage..."))?;
    writeln!(out)?;

    writeln!(out, "Setting swappiness to {}...", swappiness)?;
    app.tuning().set_swappiness(swappiness)?;

    writeln!(out)?;
    writeln!(out, "{}", theme.success("Desktop mode activated!"))?;
    writeln!(out, "System balanced for general use")?;
    Ok(())
}
