//! Runtime configuration: defaults, an optional RON file, then CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use reelgrab_core::{BackendEndpoints, FormSettings, DEFAULT_BACKEND_URL, DEFAULT_RESET_DELAY};
use reelgrab_engine::{ClientSettings, DownloadSettings, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level name understood by `log::LevelFilter`.
    pub level: String,
    pub terminal: bool,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            terminal: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub reset_delay_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_metadata_bytes: u64,
    /// When set, downloads are saved here instead of printing their URL.
    pub save_dir: Option<PathBuf>,
    pub color: bool,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            reset_delay_ms: DEFAULT_RESET_DELAY.as_millis() as u64,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_metadata_bytes: client.max_body_bytes,
            save_dir: None,
            color: true,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        engine_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Defaults, overlaid by `--config` when given, overlaid by the other flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would fail every request before it starts.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        if self.max_metadata_bytes == 0 {
            bail!("max_metadata_bytes must be at least 1");
        }
        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(backend) = &cli.backend {
            self.backend_url = backend.clone();
        }
        if let Some(dir) = &cli.save_dir {
            self.save_dir = Some(dir.clone());
        }
        if let Some(delay) = cli.reset_delay_ms {
            self.reset_delay_ms = delay;
        }
        if cli.no_color {
            self.color = false;
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if let Some(file) = &cli.log_file {
            self.log.file = Some(file.clone());
        }
    }

    pub fn form_settings(&self) -> Result<FormSettings> {
        let endpoints = BackendEndpoints::parse(&self.backend_url)
            .with_context(|| format!("bad backend url {:?}", self.backend_url))?;
        Ok(FormSettings {
            endpoints,
            reset_delay: Duration::from_millis(self.reset_delay_ms),
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            metadata: ClientSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_body_bytes: self.max_metadata_bytes,
            },
            download: DownloadSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                ..DownloadSettings::default()
            },
        }
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        engine_logging::parse_level(&self.log.level)
            .ok_or_else(|| anyhow!("unknown log level {:?}", self.log.level))
    }

    /// `None` when logging is switched off entirely.
    pub fn log_destination(&self) -> Option<LogDestination> {
        match (&self.log.file, self.log.terminal) {
            (Some(path), true) => Some(LogDestination::Both(path.clone())),
            (Some(path), false) => Some(LogDestination::File(path.clone())),
            (None, true) => Some(LogDestination::Terminal),
            (None, false) => None,
        }
    }
}
