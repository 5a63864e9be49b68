//! The contract every backend implements.

use crate::error::{HookError, ServiceError};
use crate::logger::Logger;
use crate::types::Status;

/// The supervised program's own start/stop hooks, driven by a foreground run.
///
/// `start` should return promptly; long-running work belongs on a thread the
/// program owns, stopped again from `stop`.
pub trait Program {
    fn start(&mut self) -> Result<(), HookError>;
    fn stop(&mut self) -> Result<(), HookError>;
}

/// Uniform lifecycle surface over one host supervisor.
///
/// All calls are synchronous and block on the supervisor's control tooling.
/// Constructing an implementation never touches the filesystem; side effects
/// happen only in these methods.
pub trait Service {
    /// Short identifier of the backend, e.g. `"linux-runit"`.
    fn platform(&self) -> &str;

    /// Human-facing name of the service.
    fn display_name(&self) -> &str;

    /// Register the service with the supervisor.
    ///
    /// Fails with [`ServiceError::AlreadyExists`] if a registration is present.
    fn install(&self) -> Result<(), ServiceError>;

    /// Remove the registration. Safe to call when nothing is installed.
    fn uninstall(&self) -> Result<(), ServiceError>;

    fn start(&self) -> Result<(), ServiceError>;
    fn stop(&self) -> Result<(), ServiceError>;
    fn restart(&self) -> Result<(), ServiceError>;

    fn status(&self) -> Result<Status, ServiceError>;

    /// Process id of the live service process.
    fn pid(&self) -> Result<u32, ServiceError>;

    /// Run `program` in the foreground until told to stop.
    fn run(&self, program: &mut dyn Program) -> Result<(), ServiceError>;

    /// Logger suited to where the process is running.
    fn logger(&self) -> Logger;
}
