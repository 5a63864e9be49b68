//! Calls into the external `sv` control binary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use keeper_core::ServiceError;

/// Subcommands of `sv` this backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Up,
    Down,
    Restart,
    Status,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Up => "up",
            Verb::Down => "down",
            Verb::Restart => "restart",
            Verb::Status => "status",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit code plus stdout followed by stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// [`ServiceError::CommandFailed`] describing this exit.
    pub fn into_failure(self, binary: String, verb: Verb, target: &Path) -> ServiceError {
        ServiceError::CommandFailed {
            binary,
            verb: verb.as_str(),
            target: target.to_path_buf(),
            code: self.code,
            output: self.output.trim().to_string(),
        }
    }
}

/// Runs `<binary> <verb> <target>` and reports what happened.
///
/// A non-zero exit is returned as data: for `status` it is a legitimate
/// answer. Only failures to get an answer at all (spawn error, killed by a
/// signal) are errors.
pub trait ControlBridge {
    /// Name of the control binary, for error messages.
    fn binary(&self) -> String;

    fn invoke(&self, verb: Verb, target: &Path) -> Result<CommandOutput, ServiceError>;
}

impl<B: ControlBridge + ?Sized> ControlBridge for Box<B> {
    fn binary(&self) -> String {
        (**self).binary()
    }

    fn invoke(&self, verb: Verb, target: &Path) -> Result<CommandOutput, ServiceError> {
        (**self).invoke(verb, target)
    }
}

/// Run an action verb; a non-zero exit becomes [`ServiceError::CommandFailed`].
pub fn act<B: ControlBridge + ?Sized>(
    bridge: &B,
    verb: Verb,
    target: &Path,
) -> Result<(), ServiceError> {
    let out = bridge.invoke(verb, target)?;
    if out.success() {
        return Ok(());
    }
    Err(out.into_failure(bridge.binary(), verb, target))
}

/// The real `sv` binary.
#[derive(Debug, Clone)]
pub struct SvBridge {
    binary: PathBuf,
}

impl SvBridge {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        SvBridge {
            binary: binary.into(),
        }
    }
}

impl ControlBridge for SvBridge {
    fn binary(&self) -> String {
        self.binary.display().to_string()
    }

    fn invoke(&self, verb: Verb, target: &Path) -> Result<CommandOutput, ServiceError> {
        let output = Command::new(&self.binary)
            .arg(verb.as_str())
            .arg(target)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ServiceError::ExternalCommand {
                binary: self.binary(),
                verb: verb.as_str(),
                target: target.to_path_buf(),
                source,
            })?;

        let Some(code) = output.status.code() else {
            return Err(ServiceError::Signalled {
                binary: self.binary(),
                verb: verb.as_str(),
                target: target.to_path_buf(),
            });
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::debug!(
            binary = %self.binary.display(),
            verb = %verb,
            target = %target.display(),
            code,
            output = %text.trim(),
            "control command finished"
        );
        Ok(CommandOutput { code, output: text })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn stub(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("sv");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn captures_stdout_stderr_and_code() {
        let dir = TempDir::new().unwrap();
        let bridge = SvBridge::new(stub(&dir, "echo \"$1 $2\"; echo oops >&2; exit 3"));
        let out = bridge.invoke(Verb::Status, Path::new("/etc/service/web")).unwrap();
        assert_eq!(out.code, 3);
        assert_eq!(out.output, "status /etc/service/web\noops\n");
        assert!(!out.success());
    }

    #[test]
    fn missing_binary_is_external_command_error() {
        let bridge = SvBridge::new("/definitely/not/here/sv");
        let err = bridge.invoke(Verb::Up, Path::new("/etc/service/web")).unwrap_err();
        match err {
            ServiceError::ExternalCommand { verb, target, .. } => {
                assert_eq!(verb, "up");
                assert_eq!(target, PathBuf::from("/etc/service/web"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn signal_termination_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bridge = SvBridge::new(stub(&dir, "kill -9 $$"));
        let err = bridge.invoke(Verb::Status, Path::new("/x")).unwrap_err();
        assert!(matches!(err, ServiceError::Signalled { .. }), "got: {err}");
    }

    #[test]
    fn act_turns_non_zero_exit_into_command_failed() {
        let dir = TempDir::new().unwrap();
        let bridge = SvBridge::new(stub(&dir, "echo 'fail: web: runsv not running'; exit 1"));
        let err = act(&bridge, Verb::Down, Path::new("/etc/service/web")).unwrap_err();
        match err {
            ServiceError::CommandFailed { verb, code, output, .. } => {
                assert_eq!(verb, "down");
                assert_eq!(code, 1);
                assert_eq!(output, "fail: web: runsv not running");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn act_accepts_zero_exit() {
        let dir = TempDir::new().unwrap();
        let bridge = SvBridge::new(stub(&dir, "echo 'ok: run: web: (pid 1) 0s'"));
        act(&bridge, Verb::Up, Path::new("/etc/service/web")).unwrap();
    }
}
