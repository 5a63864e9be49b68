//! Service manager detection for `keeper-detector`.
//!
//! `detect()` probes the search path for each supervisor's tell-tale binary
//! and [`Backend::select`] turns the answer into a service handle once, at
//! startup. The choice never changes afterwards.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use keeper_core::{Config, Logger, Program, Service, ServiceError, Status};
use keeper_runit::{RunitService, RunitSettings};

// ---------------------------------------------------------------------------
// Probing
// ---------------------------------------------------------------------------

/// Supervisors keeper knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Runit,
}

impl BackendKind {
    /// In priority order.
    pub fn all() -> &'static [BackendKind] {
        &[BackendKind::Runit]
    }

    /// Binary whose presence on the search path means this supervisor is usable.
    pub fn probe_binary(self) -> &'static str {
        match self {
            BackendKind::Runit => "runsvdir",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Runit => f.write_str("runit"),
        }
    }
}

/// First supported supervisor found on `$PATH`.
pub fn detect() -> Option<BackendKind> {
    let path = std::env::var_os("PATH")?;
    detect_in(&path)
}

/// First supported supervisor found on `path_var` (a `PATH`-style list).
pub fn detect_in(path_var: impl AsRef<OsStr>) -> Option<BackendKind> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| Path::new("/").to_path_buf());
    BackendKind::all().iter().copied().find(|kind| {
        match which::which_in(kind.probe_binary(), Some(path_var.as_ref()), &cwd) {
            Ok(found) => {
                tracing::debug!(backend = %kind, binary = %found.display(), "service manager found");
                true
            }
            Err(_) => false,
        }
    })
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// One service handle per supported supervisor.
pub enum Backend {
    Runit(RunitService),
}

impl Backend {
    /// Detect the host supervisor and build a handle for `config`.
    ///
    /// Fails with `UnsupportedFeature` when no supported supervisor is found.
    pub fn select(config: Config, settings: RunitSettings) -> Result<Self, ServiceError> {
        let kind = detect().ok_or(ServiceError::UnsupportedFeature(
            "no supported service manager found on this host",
        ))?;
        Ok(Self::for_kind(kind, config, settings))
    }

    pub fn for_kind(kind: BackendKind, config: Config, settings: RunitSettings) -> Self {
        match kind {
            BackendKind::Runit => Backend::Runit(RunitService::new(config, settings)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Runit(_) => BackendKind::Runit,
        }
    }

    fn inner(&self) -> &dyn Service {
        match self {
            Backend::Runit(svc) => svc,
        }
    }
}

impl Service for Backend {
    fn platform(&self) -> &str {
        self.inner().platform()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn install(&self) -> Result<(), ServiceError> {
        self.inner().install()
    }

    fn uninstall(&self) -> Result<(), ServiceError> {
        self.inner().uninstall()
    }

    fn start(&self) -> Result<(), ServiceError> {
        self.inner().start()
    }

    fn stop(&self) -> Result<(), ServiceError> {
        self.inner().stop()
    }

    fn restart(&self) -> Result<(), ServiceError> {
        self.inner().restart()
    }

    fn status(&self) -> Result<Status, ServiceError> {
        self.inner().status()
    }

    fn pid(&self) -> Result<u32, ServiceError> {
        self.inner().pid()
    }

    fn run(&self, program: &mut dyn Program) -> Result<(), ServiceError> {
        self.inner().run(program)
    }

    fn logger(&self) -> Logger {
        self.inner().logger()
    }
}
