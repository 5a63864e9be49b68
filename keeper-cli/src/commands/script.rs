//! `keeper script --config <path>`: print the run script install would write.

use anyhow::{Context, Result};
use clap::Args;

use keeper_core::options::{OPTION_LOG_OUTPUT, OPTION_LOG_OUTPUT_DEFAULT};
use keeper_renderer::{ScriptContext, ScriptTemplate};

use super::ServiceArgs;

#[derive(Args, Debug)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
}

impl ScriptArgs {
    pub fn run(self) -> Result<()> {
        let config = self.service.load_config()?;
        let exec_path = config.exec_path().context("cannot resolve executable path")?;
        let ctx = ScriptContext::new(&config, &exec_path).context("invalid service config")?;

        let run = ScriptTemplate::run_script(&config)
            .and_then(|tpl| tpl.render(&ctx))
            .context("failed to render run script")?;
        print!("{run}");

        if config
            .options
            .bool(OPTION_LOG_OUTPUT, OPTION_LOG_OUTPUT_DEFAULT)
        {
            let log = ScriptTemplate::log_script(&config)
                .and_then(|tpl| tpl.render(&ctx))
                .context("failed to render log script")?;
            println!("--- log/run ---");
            print!("{log}");
        }
        Ok(())
    }
}
