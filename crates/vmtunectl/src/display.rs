//! Terminal rendering for memory reports
//!
//! Everything renders into a `Write` so the same code drives stdout and tests.

use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

use vmtune_common::{format_kb, percent, truncate_percent, ColorMode, MemorySnapshot, PressureLevel};

const VERSION: &str = env!("VMTUNE_VERSION");

/// Whether to emit ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn from_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => Self {
                color: console::colors_enabled(),
            },
            ColorMode::Always => Self::colored(),
            ColorMode::Never => Self::plain(),
        }
    }

    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.bold().green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warn(&self, text: &str) -> String {
        if self.color {
            text.bold().yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.bold().red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn level(&self, level: PressureLevel, text: &str) -> String {
        match level {
            PressureLevel::Critical => self.error(text),
            PressureLevel::High | PressureLevel::Moderate => self.warn(text),
            PressureLevel::Normal => self.success(text),
        }
    }
}

pub fn version_line() -> String {
    format!("vmtunectl version {}", VERSION)
}

pub fn render_banner<W: Write>(out: &mut W, theme: Theme) -> io::Result<()> {
    let name = format!("vmtune Memory Optimizer v{}", VERSION);
    writeln!(out, "{}", theme.title("+-----------------------------------------------+"))?;
    writeln!(out, "{}", theme.title(&format!("|   {:<44}|", name)))?;
    writeln!(out, "{}", theme.title(&format!("|   {:<44}|", "Linux virtual memory tuning")))?;
    writeln!(out, "{}", theme.title("+-----------------------------------------------+"))?;
    writeln!(out)
}

fn section<W: Write>(out: &mut W, theme: Theme, name: &str) -> io::Result<()> {
    writeln!(out, "{}", theme.heading(&format!("--- {} ---", name)))?;
    writeln!(out)
}

/// Memory, swap (when configured) and tuning sections
pub fn render_info<W: Write>(
    out: &mut W,
    theme: Theme,
    snapshot: &MemorySnapshot,
    swappiness: Option<u32>,
) -> io::Result<()> {
    section(out, theme, "Memory Information")?;
    writeln!(out, "Total Memory:     {}", format_kb(snapshot.total))?;
    writeln!(out, "Available Memory: {}", format_kb(snapshot.available))?;
    writeln!(out, "Free Memory:      {}", format_kb(snapshot.free))?;
    writeln!(out, "Buffers:          {}", format_kb(snapshot.buffers))?;
    writeln!(out, "Cached:           {}", format_kb(snapshot.cached))?;
    writeln!(out)?;
    writeln!(
        out,
        "Memory Usage:     {} ({}%)",
        format_kb(snapshot.used()),
        percent(snapshot.used(), snapshot.total)
    )?;

    if snapshot.has_swap() {
        writeln!(out)?;
        section(out, theme, "Swap Information")?;
        writeln!(out, "Total Swap:       {}", format_kb(snapshot.swap_total))?;
        writeln!(out, "Free Swap:        {}", format_kb(snapshot.swap_free))?;
        writeln!(out, "Swap Cached:      {}", format_kb(snapshot.swap_cached))?;
        writeln!(
            out,
            "Swap Usage:       {} ({}%)",
            format_kb(snapshot.swap_used()),
            percent(snapshot.swap_used(), snapshot.swap_total)
        )?;
    }

    writeln!(out)?;
    section(out, theme, "System Tuning")?;
    if let Some(value) = swappiness {
        writeln!(out, "Current Swappiness: {}", value)?;
    }
    writeln!(out)
}

pub fn render_pressure<W: Write>(out: &mut W, theme: Theme, snapshot: &MemorySnapshot) -> io::Result<()> {
    let pressure = snapshot.pressure();
    let level = PressureLevel::from_percent(pressure);
    writeln!(
        out,
        "{} {}",
        theme.heading("Memory Pressure:"),
        theme.level(level, &format!("{} ({}%)", level, truncate_percent(pressure)))
    )?;
    writeln!(out)
}

/// Change in available memory across an optimization pass, in kB
pub fn available_delta(before: &MemorySnapshot, after: &MemorySnapshot) -> i64 {
    after.available as i64 - before.available as i64
}

pub fn render_optimize_result<W: Write>(
    out: &mut W,
    theme: Theme,
    before: &MemorySnapshot,
    after: &MemorySnapshot,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", theme.success("Optimization complete!"))?;

    let delta = available_delta(before, after);
    if delta >= 0 {
        writeln!(out, "Memory freed: {}", format_kb(delta.unsigned_abs()))?;
    } else {
        writeln!(out, "Memory usage grew by: {}", format_kb(delta.unsigned_abs()))?;
    }
    writeln!(out, "Available now: {}", format_kb(after.available))
}

/// Machine-readable form of `--info`
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub version: &'static str,
    pub memory: MemorySnapshot,
    pub used: u64,
    pub pressure_percent: u32,
    pub pressure: PressureLevel,
    pub swap_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swappiness: Option<u32>,
}

impl InfoReport {
    pub fn new(snapshot: MemorySnapshot, swappiness: Option<u32>) -> Self {
        Self {
            version: VERSION,
            memory: snapshot,
            used: snapshot.used(),
            pressure_percent: truncate_percent(snapshot.pressure()),
            pressure: PressureLevel::of(&snapshot),
            swap_used: snapshot.swap_used(),
            swappiness,
        }
    }
}
