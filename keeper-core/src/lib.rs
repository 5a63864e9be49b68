//! Keeper core library: the backend-neutral service contract.
//!
//! - [`config`] / [`options`]: what a service is
//! - [`service`]: the [`Service`] and [`Program`] traits backends implement
//! - [`error`]: [`ServiceError`], shared by every backend
//! - [`config_file`]: YAML load / save
//! - [`logger`]: console vs. supervisor log sink

pub mod config;
pub mod config_file;
pub mod error;
pub mod logger;
pub mod options;
pub mod service;
pub mod types;

pub use config::{Config, ServiceName};
pub use error::{HookError, ServiceError};
pub use logger::{LogSink, Logger};
pub use options::{OptionValue, Options, RunWait};
pub use service::{Program, Service};
pub use types::Status;
