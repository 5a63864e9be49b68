//! Template context: the serializable payload a run script is rendered from.
//!
//! Custom scripts see the same field names as the default one:
//! `name`, `display_name`, `description`, `working_directory`, `path`,
//! `arguments`, `user_name`, `env_vars` (list of `{key, value}`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use keeper_core::Config;

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptContext {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub working_directory: String,
    /// Resolved absolute path of the program to exec.
    pub path: String,
    pub arguments: Vec<String>,
    pub user_name: Option<String>,
    /// Sorted by key.
    pub env_vars: Vec<EnvVar>,
}

fn valid_env_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ScriptContext {
    /// Build a context from `config` and the already-resolved executable `path`.
    ///
    /// An empty working directory becomes `/`.
    pub fn new(config: &Config, path: &Path) -> Result<Self, RenderError> {
        let env_vars = config
            .env_vars
            .iter()
            .map(|(key, value)| {
                if valid_env_name(key) {
                    Ok(EnvVar {
                        key: key.clone(),
                        value: value.clone(),
                    })
                } else {
                    Err(RenderError::InvalidEnvName(key.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let working_directory = if config.working_directory.as_os_str().is_empty() {
            "/".to_string()
        } else {
            config.working_directory.display().to_string()
        };

        Ok(ScriptContext {
            name: config.name.0.clone(),
            display_name: config.display().to_string(),
            description: config.description.clone(),
            working_directory,
            path: path.display().to_string(),
            arguments: config.arguments.clone(),
            user_name: config.user_name.clone().filter(|u| !u.is_empty()),
            env_vars,
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
