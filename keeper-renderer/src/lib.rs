//! # keeper-renderer
//!
//! Tera-based engine that renders supervisor launch scripts from a service
//! [`keeper_core::Config`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use keeper_core::Config;
//! use keeper_renderer::{ScriptContext, ScriptTemplate};
//!
//! fn render(config: &Config) -> Result<String, keeper_renderer::RenderError> {
//!     let ctx = ScriptContext::new(config, Path::new("/usr/local/bin/web"))?;
//!     ScriptTemplate::run_script(config)?.render(&ctx)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod escape;

pub use context::{EnvVar, ScriptContext};
pub use engine::{ScriptTemplate, DEFAULT_LOG_SCRIPT, DEFAULT_RUN_SCRIPT};
pub use error::RenderError;
pub use escape::shell_escape;
