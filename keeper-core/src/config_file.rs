//! YAML service config files.
//!
//! ```yaml
//! name: web
//! display_name: Web Frontend
//! working_directory: /srv/web
//! executable: /srv/web/bin/web
//! arguments: ["--port", "8080"]
//! env_vars:
//!   RUST_LOG: info
//! options:
//!   LogOutput: true
//!   SettleTimeout: 10s
//! ```

use std::path::Path;

use crate::config::Config;
use crate::error::{io_err, ServiceError};

/// Load a [`Config`] from `path`.
///
/// Returns `ServiceError::ConfigNotFound` if absent,
/// `ServiceError::Parse` (with path + line context) if malformed YAML.
pub fn load(path: &Path) -> Result<Config, ServiceError> {
    if !path.exists() {
        return Err(ServiceError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| ServiceError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically write `config` to `path` via a sibling `.tmp` file.
pub fn save(path: &Path, config: &Config) -> Result<(), ServiceError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("web.yaml");
        let cfg = Config::new("web")
            .with_executable("/srv/web/bin/web")
            .with_arguments(["--port", "8080"])
            .with_env("RUST_LOG", "debug");

        save(&path, &cfg).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.name, cfg.name);
        assert_eq!(loaded.executable, cfg.executable);
        assert_eq!(loaded.arguments, cfg.arguments);
        assert_eq!(loaded.env_vars, cfg.env_vars);
        assert!(!dir.path().join("web.yaml.tmp").exists());
    }
}
