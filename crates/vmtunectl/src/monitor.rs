//! Live memory monitor
//!
//! Redraws the report every interval until the stop signal fires. `main`
//! wires Ctrl+C to the signal; tests drive it directly.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

use vmtune_common::{truncate_percent, Kernel};

use crate::app::App;
use crate::display::{render_banner, render_info, render_pressure};

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub interval: Duration,
    /// Stop after this many refreshes, `None` runs until stopped
    pub max_refreshes: Option<u64>,
    pub clear_screen: bool,
}

impl MonitorOptions {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_refreshes: None,
            clear_screen: false,
        }
    }
}

/// Run the refresh loop. Returns the number of refreshes drawn.
pub async fn run_monitor<K, W>(
    app: &App<'_, K>,
    out: &mut W,
    options: &MonitorOptions,
    mut stop: watch::Receiver<bool>,
) -> Result<u64>
where
    K: Kernel + ?Sized,
    W: Write,
{
    let theme = app.theme();
    let alert_percent = app.config().monitor.alert_percent;
    let mut refreshes = 0u64;

    writeln!(out, "{}", theme.title("Starting memory monitor (Ctrl+C to stop)..."))?;
    writeln!(out)?;

    loop {
        if *stop.borrow() {
            break;
        }

        if options.clear_screen {
            console::Term::stdout().clear_screen()?;
        }

        let snapshot = app.snapshot()?;
        let swappiness = app.tuning().read_swappiness();

        render_banner(out, theme)?;
        render_info(out, theme, &snapshot, swappiness)?;
        render_pressure(out, theme, &snapshot)?;

        let pressure = snapshot.pressure();
        if pressure > alert_percent {
            warn!("Memory usage high: {:.1}%", pressure);
            writeln!(
                out,
                "{}",
                theme.error(&format!(
                    "ALERT: memory usage {}% exceeds {}%",
                    truncate_percent(pressure),
                    alert_percent
                ))
            )?;
            writeln!(out)?;
        }

        writeln!(
            out,
            "Last update: {}  Next update in {} seconds...",
            chrono::Local::now().format("%H:%M:%S"),
            options.interval.as_secs()
        )?;
        out.flush()?;

        refreshes += 1;
        if options.max_refreshes.is_some_and(|max| refreshes >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(options.interval) => {}
            changed = stop.changed() => {
                // Sender gone: nobody can stop us any more, keep the cadence.
                if changed.is_err() {
                    tokio::time::sleep(options.interval).await;
                }
            }
        }
    }

    Ok(refreshes)
}
