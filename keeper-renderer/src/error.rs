//! Error types for keeper-renderer.

use keeper_core::ServiceError;
use thiserror::Error;

/// All errors that can arise while compiling or rendering a script.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {}", chain(.0))]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An environment variable name that `export` would reject.
    #[error("invalid environment variable name {0:?}")]
    InvalidEnvName(String),
}

/// Tera hides the useful part of parse errors in the source chain.
fn chain(err: &tera::Error) -> String {
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}

impl From<RenderError> for ServiceError {
    fn from(err: RenderError) -> Self {
        ServiceError::Template(err.to_string())
    }
}
