//! Command dispatch
//!
//! Binds a kernel backend, the loaded config and output settings, then runs
//! one action. The privilege gate runs before any kernel access.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;

use vmtune_common::{read_snapshot, Kernel, MemorySnapshot, TuningController, VmTuneConfig};

use crate::cli::Action;
use crate::display::{render_banner, render_info, version_line, InfoReport, Theme};
use crate::monitor::{run_monitor, MonitorOptions};
use crate::privilege::ensure_privileged;
use crate::workflows::{desktop_profile, gaming_profile, optimize};

pub struct App<'a, K: Kernel + ?Sized> {
    kernel: &'a K,
    config: &'a VmTuneConfig,
    theme: Theme,
    is_root: bool,
}

impl<'a, K: Kernel + ?Sized> App<'a, K> {
    pub fn new(kernel: &'a K, config: &'a VmTuneConfig, theme: Theme, is_root: bool) -> Self {
        Self {
            kernel,
            config,
            theme,
            is_root,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &VmTuneConfig {
        self.config
    }

    pub fn tuning(&self) -> TuningController<'_, K> {
        TuningController::new(self.kernel, &self.config.paths)
    }

    pub fn snapshot(&self) -> vmtune_common::Result<MemorySnapshot> {
        read_snapshot(self.kernel, &self.config.paths)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.config.tuning.settle_delay_ms)
    }

    pub fn monitor_options(&self) -> MonitorOptions {
        MonitorOptions::every(Duration::from_secs(self.config.monitor.interval_secs))
    }

    /// Info report: banner, memory, swap and tuning sections
    pub fn info<W: Write>(&self, out: &mut W, json: bool) -> Result<()> {
        let snapshot = self.snapshot()?;
        let swappiness = self.tuning().read_swappiness();

        if json {
            let report = InfoReport::new(snapshot, swappiness);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            return Ok(());
        }

        render_banner(out, self.theme)?;
        render_info(out, self.theme, &snapshot, swappiness)?;
        Ok(())
    }

    /// Run one action. `stop` only matters for the monitor.
    pub async fn run<W: Write>(
        &self,
        action: Action,
        out: &mut W,
        options: &MonitorOptions,
        stop: watch::Receiver<bool>,
    ) -> Result<()> {
        ensure_privileged(action, self.is_root)?;

        match action {
            Action::Version => {
                writeln!(out, "{}", version_line())?;
            }
            Action::Info { json } => self.info(out, json)?,
            Action::Monitor => {
                run_monitor(self, out, options, stop).await?;
                writeln!(out)?;
                writeln!(out, "{}", self.theme.warn("Monitor stopped"))?;
            }
            Action::Optimize | Action::Aggressive => {
                render_banner(out, self.theme)?;
                optimize(self, out, action == Action::Aggressive).await?;
            }
            Action::Gaming => {
                render_banner(out, self.theme)?;
                gaming_profile(self, out)?;
            }
            Action::Desktop => {
                render_banner(out, self.theme)?;
                desktop_profile(self, out)?;
            }
        }
        Ok(())
    }
}
