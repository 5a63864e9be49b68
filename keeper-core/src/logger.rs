//! Logger selection for processes that may run under a supervisor.
//!
//! Attached to a terminal we log human-readable lines to stderr. Under a
//! supervisor nobody is watching the terminal, so we emit JSON lines on
//! stdout where the supervisor's log service collects them.

use std::io::IsTerminal;

/// Which sink a [`Logger`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Console,
    System,
}

/// Error-reporting channel handed to a service.
#[derive(Debug, Clone)]
pub struct Logger {
    sink: LogSink,
    service: String,
}

impl Logger {
    /// `Console` when `interactive`, `System` otherwise.
    pub fn select(service: impl Into<String>, interactive: bool) -> Self {
        let sink = if interactive {
            LogSink::Console
        } else {
            LogSink::System
        };
        Logger {
            sink,
            service: service.into(),
        }
    }

    /// Choose based on whether stderr is a terminal.
    pub fn for_host(service: impl Into<String>) -> Self {
        Self::select(service, std::io::stderr().is_terminal())
    }

    pub fn sink(&self) -> LogSink {
        self.sink
    }

    /// Install the global tracing subscriber for this sink.
    ///
    /// Honours `RUST_LOG`, defaulting to `info`. A second call is a no-op.
    pub fn init(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = match self.sink {
            LogSink::Console => fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init(),
            LogSink::System => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stdout)
                .try_init(),
        };
    }

    pub fn error(&self, message: &str) {
        tracing::error!(service = %self.service, "{message}");
    }

    pub fn warning(&self, message: &str) {
        tracing::warn!(service = %self.service, "{message}");
    }

    pub fn info(&self, message: &str) {
        tracing::info!(service = %self.service, "{message}");
    }
}
