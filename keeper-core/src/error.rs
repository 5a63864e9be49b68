//! Error types for keeper-core and every backend built on it.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error returned by a [`crate::Program`] start or stop hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// All errors a service backend can surface to its caller.
///
/// Nothing here is retried by the backend; every variant carries enough
/// context (target path, attempted verb) to diagnose the failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Install found a registration already on disk.
    #[error("service definition already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// The backend cannot provide the requested capability.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    /// Supervisor output did not contain the expected pattern.
    #[error("could not find {what} in supervisor output: {output:?}")]
    NotFound { what: &'static str, output: String },

    /// The control binary could not be spawned at all (missing, not executable).
    #[error("failed to run `{binary} {verb} {target}`: {source}")]
    ExternalCommand {
        binary: String,
        verb: &'static str,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The control binary exited non-zero without a usable answer.
    #[error("`{binary} {verb} {target}` exited with status {code}: {output}")]
    CommandFailed {
        binary: String,
        verb: &'static str,
        target: PathBuf,
        code: i32,
        output: String,
    },

    /// The control binary was killed by a signal before it could exit.
    #[error("`{binary} {verb} {target}` was terminated by a signal")]
    Signalled {
        binary: String,
        verb: &'static str,
        target: PathBuf,
    },

    /// The run script template failed to compile or render.
    #[error("run script template error: {0}")]
    Template(String),

    /// The supervisor never reported a settled state for a new registration.
    #[error("supervisor did not pick up {target} within {waited:?}")]
    TimedOut { target: PathBuf, waited: Duration },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A program start/stop hook failed.
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("service config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML parse error on load, with the file path and serde_yaml's line context.
    #[error("failed to parse service config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ServiceError {
    ServiceError::Io {
        path: path.into(),
        source,
    }
}
