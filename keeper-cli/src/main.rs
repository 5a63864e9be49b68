//! Keeper: install and control supervised services.
//!
//! # Usage
//!
//! ```text
//! keeper init <path> --name <name> --exec <program> [--arg <arg>]... [--workdir <dir>]
//! keeper install|uninstall|start|stop|restart --config <path>
//! keeper status --config <path> [--json]
//! keeper pid --config <path>
//! keeper run --config <path>
//! keeper script --config <path>
//! keeper detect
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    control::{ControlArgs, ControlVerb},
    detect::DetectArgs,
    init::InitArgs,
    run::RunArgs,
    script::ScriptArgs,
    status::{PidArgs, StatusArgs},
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "keeper",
    version,
    about = "Install and control services under the host's supervisor",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a service config file.
    Init(InitArgs),

    /// Register the service with the supervisor.
    Install(ControlArgs),

    /// Remove the service registration.
    Uninstall(ControlArgs),

    /// Bring the service up.
    Start(ControlArgs),

    /// Take the service down.
    Stop(ControlArgs),

    /// Restart the service.
    Restart(ControlArgs),

    /// Print the service status.
    Status(StatusArgs),

    /// Print the service's process id.
    Pid(PidArgs),

    /// Run the configured program in the foreground until signalled.
    Run(RunArgs),

    /// Print the run script install would write.
    Script(ScriptArgs),

    /// Print which supervisor was detected on this host.
    Detect(DetectArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Install(args) => args.run(ControlVerb::Install),
        Commands::Uninstall(args) => args.run(ControlVerb::Uninstall),
        Commands::Start(args) => args.run(ControlVerb::Start),
        Commands::Stop(args) => args.run(ControlVerb::Stop),
        Commands::Restart(args) => args.run(ControlVerb::Restart),
        Commands::Status(args) => args.run(),
        Commands::Pid(args) => args.run(),
        Commands::Run(args) => args.run(),
        Commands::Script(args) => args.run(),
        Commands::Detect(args) => args.run(),
    }
}
