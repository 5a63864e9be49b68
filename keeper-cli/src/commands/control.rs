//! `keeper install|uninstall|start|stop|restart --config <path>`

use std::fmt;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use keeper_core::{Logger, Service};

use super::ServiceArgs;

#[derive(Debug, Clone, Copy)]
pub enum ControlVerb {
    Install,
    Uninstall,
    Start,
    Stop,
    Restart,
}

impl ControlVerb {
    fn past_tense(self) -> &'static str {
        match self {
            ControlVerb::Install => "Installed",
            ControlVerb::Uninstall => "Uninstalled",
            ControlVerb::Start => "Started",
            ControlVerb::Stop => "Stopped",
            ControlVerb::Restart => "Restarted",
        }
    }
}

impl fmt::Display for ControlVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControlVerb::Install => "install",
            ControlVerb::Uninstall => "uninstall",
            ControlVerb::Start => "start",
            ControlVerb::Stop => "stop",
            ControlVerb::Restart => "restart",
        };
        f.write_str(s)
    }
}

#[derive(Args, Debug)]
pub struct ControlArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
}

impl ControlArgs {
    pub fn run(self, verb: ControlVerb) -> Result<()> {
        let backend = self.service.open()?;
        Logger::select(backend.display_name(), true).init();

        let result = match verb {
            ControlVerb::Install => backend.install(),
            ControlVerb::Uninstall => backend.uninstall(),
            ControlVerb::Start => backend.start(),
            ControlVerb::Stop => backend.stop(),
            ControlVerb::Restart => backend.restart(),
        };
        result.with_context(|| {
            format!(
                "failed to {verb} '{}' ({})",
                backend.display_name(),
                backend.platform()
            )
        })?;

        println!(
            "{} {} '{}'",
            "✓".green(),
            verb.past_tense(),
            backend.display_name()
        );
        Ok(())
    }
}
