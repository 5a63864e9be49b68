//! runit backend: services are directories under a definition root whose
//! `run` script runsv executes, made live by a symlink into the directory
//! runsvdir watches, and controlled through `sv`.

pub mod bridge;
pub mod paths;
pub mod registration;
pub mod runner;
mod service;
pub mod status;

pub use bridge::{CommandOutput, ControlBridge, SvBridge, Verb};
pub use paths::{Registration, RunitSettings, Settle};
pub use registration::RegistrationState;
pub use service::{RunitService, PLATFORM};
