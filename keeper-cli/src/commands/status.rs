//! `keeper status` / `keeper pid`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::json;

use keeper_core::{Service, Status};

use super::ServiceArgs;

/// Arguments for `keeper status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let backend = self.service.open()?;
        let status = backend
            .status()
            .with_context(|| format!("failed to query status of '{}'", backend.display_name()))?;

        if self.json {
            let pid = match status {
                Status::Running => backend.pid().ok(),
                _ => None,
            };
            let payload = json!({
                "name": backend.display_name(),
                "platform": backend.platform(),
                "status": status,
                "pid": pid,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to render status JSON")?
            );
            return Ok(());
        }

        let word = match status {
            Status::Running => status.to_string().green(),
            Status::Stopped => status.to_string().yellow(),
            Status::Unknown => status.to_string().dimmed(),
        };
        println!("{}: {}", backend.display_name(), word);
        Ok(())
    }
}

/// Arguments for `keeper pid`.
#[derive(Args, Debug)]
pub struct PidArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
}

impl PidArgs {
    pub fn run(self) -> Result<()> {
        let backend = self.service.open()?;
        let pid = backend
            .pid()
            .with_context(|| format!("no running process for '{}'", backend.display_name()))?;
        println!("{pid}");
        Ok(())
    }
}
