use std::path::{Path, PathBuf};
use std::time::Duration;

use keeper_core::options::{
    OPTION_SETTLE_INTERVAL, OPTION_SETTLE_INTERVAL_DEFAULT, OPTION_SETTLE_TIMEOUT,
    OPTION_SETTLE_TIMEOUT_DEFAULT,
};
use keeper_core::{Config, ServiceName};

/// Overrides [`DEFAULT_SERVICE_DIR`].
pub const RUN_SV_DIR_ENV: &str = "RUN_SV_DIR";
/// Overrides [`DEFAULT_DEFINITION_DIR`].
pub const RUN_IT_DIR_ENV: &str = "RUN_IT_DIR";

/// Directory runsvdir watches for live service symlinks.
pub const DEFAULT_SERVICE_DIR: &str = "/etc/service";
/// Directory holding service definitions.
pub const DEFAULT_DEFINITION_DIR: &str = "/etc/runit";
pub const DEFAULT_CONTROL_BINARY: &str = "sv";

pub const RUN_SCRIPT: &str = "run";
pub const LOG_DIR: &str = "log";
pub const LOG_OUTPUT_DIR: &str = "main";

/// How install waits for runsvdir to notice a new service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Sleep for a fixed interval and hope.
    Fixed(Duration),
    /// Probe status every `interval` until it is Running or Stopped.
    Poll { timeout: Duration, interval: Duration },
}

impl Settle {
    /// Poll strategy tuned by the `SettleTimeout` / `SettleInterval` options.
    pub fn from_config(config: &Config) -> Self {
        Settle::Poll {
            timeout: config
                .options
                .duration(OPTION_SETTLE_TIMEOUT, OPTION_SETTLE_TIMEOUT_DEFAULT),
            interval: config
                .options
                .duration(OPTION_SETTLE_INTERVAL, OPTION_SETTLE_INTERVAL_DEFAULT),
        }
    }
}

/// Construction-time settings for the runit backend.
///
/// Read once when the service handle is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunitSettings {
    pub service_dir: PathBuf,
    pub definition_dir: PathBuf,
    pub control_binary: PathBuf,
    /// `None` derives a poll strategy from the service's options.
    pub settle: Option<Settle>,
}

impl Default for RunitSettings {
    fn default() -> Self {
        RunitSettings {
            service_dir: PathBuf::from(DEFAULT_SERVICE_DIR),
            definition_dir: PathBuf::from(DEFAULT_DEFINITION_DIR),
            control_binary: PathBuf::from(DEFAULT_CONTROL_BINARY),
            settle: None,
        }
    }
}

impl RunitSettings {
    /// Defaults overridden by `RUN_SV_DIR` / `RUN_IT_DIR` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RunitSettings::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(dir) = lookup(RUN_SV_DIR_ENV).filter(|v| !v.is_empty()) {
            settings.service_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(RUN_IT_DIR_ENV).filter(|v| !v.is_empty()) {
            settings.definition_dir = PathBuf::from(dir);
        }
        settings
    }

    pub fn with_service_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.service_dir = dir.into();
        self
    }

    pub fn with_definition_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.definition_dir = dir.into();
        self
    }

    pub fn with_control_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.control_binary = binary.into();
        self
    }

    pub fn with_settle(mut self, settle: Settle) -> Self {
        self.settle = Some(settle);
        self
    }
}

/// On-disk locations of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// `<definition_dir>/<name>`: holds the `run` script.
    pub definition_dir: PathBuf,
    /// `<service_dir>/<name>`: symlink runsvdir follows.
    pub live_link: PathBuf,
}

impl Registration {
    pub fn new(settings: &RunitSettings, name: &ServiceName) -> Self {
        Registration {
            definition_dir: settings.definition_dir.join(name),
            live_link: settings.service_dir.join(name),
        }
    }

    pub fn run_script(&self) -> PathBuf {
        self.definition_dir.join(RUN_SCRIPT)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.definition_dir.join(LOG_DIR)
    }

    pub fn log_script(&self) -> PathBuf {
        self.log_dir().join(RUN_SCRIPT)
    }

    pub fn log_output_dir(&self) -> PathBuf {
        self.log_dir().join(LOG_OUTPUT_DIR)
    }

    pub fn live_link(&self) -> &Path {
        &self.live_link
    }
}
