//! Service description shared by every backend.
//!
//! A [`Config`] is built by the caller (or loaded from YAML by
//! [`crate::config_file`]) and only ever read by backends.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ServiceError};
use crate::options::Options;

/// A strongly-typed service name; doubles as the on-disk directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(pub String);

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ServiceName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ServiceName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<Path> for ServiceName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Immutable description of a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: ServiceName,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Account the supervised process should run as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub working_directory: PathBuf,
    /// Program to supervise; `None` means the current executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default)]
    pub options: Options,
}

impl Config {
    pub fn new(name: impl Into<ServiceName>) -> Self {
        Config {
            name: name.into(),
            display_name: String::new(),
            description: String::new(),
            user_name: None,
            working_directory: PathBuf::new(),
            executable: None,
            arguments: Vec::new(),
            env_vars: BTreeMap::new(),
            options: Options::default(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_user_name(mut self, user: impl Into<String>) -> Self {
        self.user_name = Some(user.into());
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = dir.into();
        self
    }

    pub fn with_executable(mut self, exe: impl Into<PathBuf>) -> Self {
        self.executable = Some(exe.into());
        self
    }

    pub fn with_arguments<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Display name when set, otherwise the service name.
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name.0
        } else {
            &self.display_name
        }
    }

    /// Absolute path of the program the supervisor should exec.
    ///
    /// A relative `executable` is resolved against the current directory; no
    /// executable at all resolves to the running binary.
    pub fn exec_path(&self) -> Result<PathBuf, ServiceError> {
        match &self.executable {
            Some(exe) if exe.is_absolute() => Ok(exe.clone()),
            Some(exe) => {
                let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
                Ok(cwd.join(exe))
            }
            None => std::env::current_exe().map_err(|e| io_err("current executable", e)),
        }
    }
}
