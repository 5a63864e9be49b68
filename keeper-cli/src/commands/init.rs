//! `keeper init <path> --name <name> --exec <program> [--arg ...]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use keeper_core::{config_file, Config};

/// Write a service config file.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the YAML config.
    pub path: PathBuf,

    /// Service name; also the runit directory name.
    #[arg(long, short = 'n')]
    pub name: String,

    /// Program the supervisor should run. Defaults to keeper itself.
    #[arg(long = "exec", short = 'e', value_name = "PROGRAM")]
    pub executable: Option<PathBuf>,

    /// Argument passed to the program; repeat for several.
    #[arg(long = "arg", short = 'a', value_name = "ARG", allow_hyphen_values = true)]
    pub arguments: Vec<String>,

    /// Directory the program starts in.
    #[arg(long = "workdir", short = 'w', value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Account to run the program as.
    #[arg(long)]
    pub user: Option<String>,

    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        if self.path.exists() && !self.force {
            bail!(
                "'{}' already exists; pass --force to overwrite",
                self.path.display()
            );
        }

        let mut config = Config::new(self.name).with_arguments(self.arguments);
        if let Some(exe) = self.executable {
            config = config.with_executable(exe);
        }
        if let Some(dir) = self.working_directory {
            config = config.with_working_directory(dir);
        }
        if let Some(display_name) = self.display_name {
            config = config.with_display_name(display_name);
        }
        if let Some(description) = self.description {
            config = config.with_description(description);
        }
        if let Some(user) = self.user {
            config = config.with_user_name(user);
        }

        config_file::save(&self.path, &config)
            .with_context(|| format!("failed to write '{}'", self.path.display()))?;
        println!(
            "{} Wrote config for '{}' to {}",
            "✓".green(),
            config.name,
            self.path.display()
        );
        Ok(())
    }
}
