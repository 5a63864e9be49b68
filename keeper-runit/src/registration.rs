//! Creates and removes a service's on-disk registration.
//!
//! A registration is the definition directory (with its `run` script) plus
//! the symlink in the live service directory that points at it. Install
//! refuses to touch an existing registration; uninstall tears down whatever
//! half of the pair it finds.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use keeper_core::error::io_err;
use keeper_core::ServiceError;

use crate::paths::Registration;

/// Rendered script bodies for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scripts {
    pub run: String,
    /// Body of `log/run`, when a log service is wanted.
    pub log: Option<String>,
}

/// Where a registration stands on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Absent,
    /// Definition directory present, live symlink missing.
    Registered,
    /// Live symlink present, definition directory missing.
    Dangling,
    Live,
}

fn present(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

impl Registration {
    pub fn state(&self) -> RegistrationState {
        match (present(&self.definition_dir), present(&self.live_link)) {
            (false, false) => RegistrationState::Absent,
            (true, false) => RegistrationState::Registered,
            (false, true) => RegistrationState::Dangling,
            (true, true) => RegistrationState::Live,
        }
    }
}

/// Create the definition directory, write its scripts, then link it live.
///
/// `render` runs after the directory exists. If it fails the directory is
/// left in place for inspection and the error is returned; nothing is
/// retried or rolled back.
pub fn install(
    reg: &Registration,
    render: impl FnOnce() -> Result<Scripts, ServiceError>,
) -> Result<(), ServiceError> {
    for path in [&reg.definition_dir, &reg.live_link] {
        if present(path) {
            return Err(ServiceError::AlreadyExists { path: path.clone() });
        }
    }

    fs::create_dir_all(&reg.definition_dir).map_err(|e| io_err(&reg.definition_dir, e))?;
    let scripts = render()?;

    write_executable(&reg.run_script(), &scripts.run)?;
    if let Some(log) = &scripts.log {
        let output_dir = reg.log_output_dir();
        fs::create_dir_all(&output_dir).map_err(|e| io_err(&output_dir, e))?;
        write_executable(&reg.log_script(), log)?;
    }

    link(&reg.definition_dir, &reg.live_link)?;
    tracing::info!(
        definition = %reg.definition_dir.display(),
        link = %reg.live_link.display(),
        "service registered"
    );
    Ok(())
}

/// Remove the live symlink, then the definition directory.
///
/// A missing symlink or directory is not an error. Failing to remove the
/// symlink is logged and ignored; failing to remove the directory is
/// returned.
pub fn uninstall(reg: &Registration) -> Result<(), ServiceError> {
    if let Err(err) = fs::remove_file(&reg.live_link) {
        if err.kind() != ErrorKind::NotFound {
            tracing::warn!(
                link = %reg.live_link.display(),
                error = %err,
                "could not remove live service link"
            );
        }
    }

    match fs::remove_dir_all(&reg.definition_dir) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(io_err(&reg.definition_dir, err)),
    }
    tracing::info!(definition = %reg.definition_dir.display(), "service unregistered");
    Ok(())
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) -> Result<(), ServiceError> {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents).map_err(|e| io_err(path, e))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) -> Result<(), ServiceError> {
    fs::write(path, contents).map_err(|e| io_err(path, e))
}

#[cfg(unix)]
fn link(target: &Path, link: &Path) -> Result<(), ServiceError> {
    std::os::unix::fs::symlink(target, link).map_err(|e| io_err(link, e))
}

#[cfg(not(unix))]
fn link(_target: &Path, _link: &Path) -> Result<(), ServiceError> {
    Err(ServiceError::UnsupportedFeature(
        "runit service links require a unix host",
    ))
}
