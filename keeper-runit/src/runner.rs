//! Foreground run: start the program, wait, stop it.

use keeper_core::error::io_err;
use keeper_core::options::OPTION_RUN_WAIT;
use keeper_core::{Program, RunWait, ServiceError};

/// Drive `program` through one foreground run.
///
/// A failing start returns immediately without waiting or stopping. Otherwise
/// blocks on `wait` when given, else until SIGINT or SIGTERM arrives, then
/// returns the result of stopping.
pub fn run(program: &mut dyn Program, wait: Option<&RunWait>) -> Result<(), ServiceError> {
    program
        .start()
        .map_err(|source| ServiceError::Hook {
            hook: "start",
            source,
        })?;

    match wait {
        Some(wait) => {
            tracing::debug!(strategy = OPTION_RUN_WAIT, "waiting on caller strategy");
            wait.wait();
        }
        None => {
            let signal = wait_for_shutdown_signal()?;
            tracing::info!(signal, "received shutdown signal");
        }
    }

    program.stop().map_err(|source| ServiceError::Hook {
        hook: "stop",
        source,
    })
}

/// Block the calling thread until an interrupt or termination signal.
pub fn wait_for_shutdown_signal() -> Result<&'static str, ServiceError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime
        .block_on(shutdown_signal())
        .map_err(|e| io_err("signal-handler", e))
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => Ok("interrupt"),
        _ = sigterm.recv() => Ok("terminate"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "interrupt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::HookError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        fail_start: bool,
        fail_stop: bool,
    }

    impl Program for Recorder {
        fn start(&mut self) -> Result<(), HookError> {
            self.calls.push("start");
            if self.fail_start {
                return Err("cannot bind".into());
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<(), HookError> {
            self.calls.push("stop");
            if self.fail_stop {
                return Err("still busy".into());
            }
            Ok(())
        }
    }

    #[test]
    fn start_wait_stop_in_order() {
        let waited = Arc::new(AtomicBool::new(false));
        let flag = waited.clone();
        let wait = RunWait::new(move || flag.store(true, Ordering::SeqCst));
        let mut program = Recorder::default();

        run(&mut program, Some(&wait)).unwrap();

        assert!(waited.load(Ordering::SeqCst));
        assert_eq!(program.calls, vec!["start", "stop"]);
    }

    #[test]
    fn start_error_short_circuits() {
        let waited = Arc::new(AtomicBool::new(false));
        let flag = waited.clone();
        let wait = RunWait::new(move || flag.store(true, Ordering::SeqCst));
        let mut program = Recorder {
            fail_start: true,
            ..Recorder::default()
        };

        let err = run(&mut program, Some(&wait)).unwrap_err();

        assert!(matches!(err, ServiceError::Hook { hook: "start", .. }));
        assert!(!waited.load(Ordering::SeqCst), "must not wait after failed start");
        assert_eq!(program.calls, vec!["start"]);
    }

    #[test]
    fn stop_error_is_returned() {
        let wait = RunWait::new(|| {});
        let mut program = Recorder {
            fail_stop: true,
            ..Recorder::default()
        };

        let err = run(&mut program, Some(&wait)).unwrap_err();
        assert!(matches!(err, ServiceError::Hook { hook: "stop", .. }));
        assert!(err.to_string().contains("still busy"));
    }
}
