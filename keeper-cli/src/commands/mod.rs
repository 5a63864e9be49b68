pub mod control;
pub mod detect;
pub mod init;
pub mod run;
pub mod script;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use keeper_core::{config_file, Config};
use keeper_detector::{Backend, BackendKind};
use keeper_runit::RunitSettings;

/// Backends selectable with `--backend`.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BackendArg {
    Runit,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Runit => BackendKind::Runit,
        }
    }
}

/// Arguments shared by every command that acts on one service.
#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service config file (see `keeper init`).
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: PathBuf,

    /// Use this backend instead of detecting one.
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Path to the runit `sv` control binary.
    #[arg(long = "sv", value_name = "PATH")]
    pub control_binary: Option<PathBuf>,
}

impl ServiceArgs {
    pub fn load_config(&self) -> Result<Config> {
        config_file::load(&self.config)
            .with_context(|| format!("failed to load service config '{}'", self.config.display()))
    }

    fn settings(&self) -> RunitSettings {
        let settings = RunitSettings::from_env();
        match &self.control_binary {
            Some(sv) => settings.with_control_binary(sv),
            None => settings,
        }
    }

    /// Load the config and bind it to the requested or detected backend.
    pub fn open(&self) -> Result<Backend> {
        self.open_with(self.load_config()?)
    }

    /// Bind an already loaded config to the requested or detected backend.
    pub fn open_with(&self, config: Config) -> Result<Backend> {
        let settings = self.settings();
        match self.backend {
            Some(kind) => Ok(Backend::for_kind(kind.into(), config, settings)),
            None => Backend::select(config, settings).context("run with --backend to skip detection"),
        }
    }
}
