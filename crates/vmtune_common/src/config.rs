//! vmtune Configuration
//!
//! Config file: ~/.config/vmtune/config.toml or /etc/vmtune/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VmTuneError;
use crate::kernel::KernelPaths;
use crate::tuning::validate_swappiness;

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always emit ANSI colors
    Always,
    /// Plain text
    Never,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Live monitor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between refreshes
    pub interval_secs: u64,

    /// Memory usage percentage above which an alert is raised
    pub alert_percent: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            alert_percent: 85.0,
        }
    }
}

/// Profile values and workflow pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub gaming_swappiness: u32,
    pub desktop_swappiness: u32,

    /// Pause after asking the kernel to reclaim, before re-reading meminfo
    pub settle_delay_ms: u64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            gaming_swappiness: 10,
            desktop_swappiness: 60,
            settle_delay_ms: 1000,
        }
    }
}

/// Main vmtune configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VmTuneConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub tuning: TuningConfig,

    #[serde(default)]
    pub paths: KernelPaths,
}

impl VmTuneConfig {
    /// User config path: $XDG_CONFIG_HOME/vmtune/config.toml or ~/.config/vmtune/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return Ok(Path::new(&xdg).join("vmtune").join("config.toml"));
            }
        }

        let home = std::env::var("HOME").context("Cannot determine home directory")?;
        Ok(Path::new(&home)
            .join(".config")
            .join("vmtune")
            .join("config.toml"))
    }

    /// System config path: /etc/vmtune/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/vmtune/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config
    /// 3. System config
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from_path(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from_path(&system_path);
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: VmTuneConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        validate_swappiness(self.tuning.gaming_swappiness)?;
        validate_swappiness(self.tuning.desktop_swappiness)?;

        if self.monitor.interval_secs == 0 {
            return Err(VmTuneError::Config(
                "monitor.interval_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.monitor.alert_percent) {
            return Err(VmTuneError::Config(format!(
                "monitor.alert_percent must be between 0 and 100, got {}",
                self.monitor.alert_percent
            )));
        }
        Ok(())
    }
}
