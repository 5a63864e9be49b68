//! `keeper run --config <path>`
//!
//! Foreground mode: start the configured program as a child process, wait for
//! SIGINT/SIGTERM, then stop the child and exit.

use std::path::PathBuf;
use std::process::{Child, Command};

use anyhow::{Context, Result};
use clap::Args;

use keeper_core::{Config, HookError, Program, Service};

use super::ServiceArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let config = self.service.load_config()?;
        let exe = config.exec_path().context("cannot resolve executable path")?;
        let mut program = ChildProgram::new(exe, &config);

        let backend = self.service.open_with(config)?;
        let logger = backend.logger();
        logger.init();

        if let Err(e) = backend.run(&mut program) {
            logger.error(&e.to_string());
            return Err(e)
                .with_context(|| format!("'{}' stopped with an error", backend.display_name()));
        }
        Ok(())
    }
}

/// Runs the configured executable as a child of this process.
struct ChildProgram {
    exe: PathBuf,
    config: Config,
    child: Option<Child>,
}

impl ChildProgram {
    fn new(exe: PathBuf, config: &Config) -> Self {
        ChildProgram {
            exe,
            config: config.clone(),
            child: None,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.args(&self.config.arguments).envs(&self.config.env_vars);
        if !self.config.working_directory.as_os_str().is_empty() {
            cmd.current_dir(&self.config.working_directory);
        }
        cmd
    }
}

impl Program for ChildProgram {
    fn start(&mut self) -> Result<(), HookError> {
        let child = self.command().spawn()?;
        tracing::info!(pid = child.id(), exe = %self.exe.display(), "started child");
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HookError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if child.try_wait()?.is_none() {
            terminate(&mut child)?;
        }
        let status = child.wait()?;
        tracing::info!(%status, "child exited");
        Ok(())
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> Result<(), HookError> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = i32::try_from(child.id())?;
    kill(Pid::from_raw(pid), Signal::SIGTERM)?;
    Ok(())
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> Result<(), HookError> {
    child.kill()?;
    Ok(())
}
