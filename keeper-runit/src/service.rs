use std::thread;
use std::time::{Duration, Instant};

use keeper_core::options::{
    OPTION_LOG_OUTPUT, OPTION_LOG_OUTPUT_DEFAULT, OPTION_USER_SERVICE, OPTION_USER_SERVICE_DEFAULT,
};
use keeper_core::{Config, Logger, Program, Service, ServiceError, Status};
use keeper_renderer::{ScriptContext, ScriptTemplate};

use crate::bridge::{act, ControlBridge, SvBridge, Verb};
use crate::paths::{Registration, RunitSettings, Settle};
use crate::registration::{self, Scripts};
use crate::{runner, status};

pub const PLATFORM: &str = "linux-runit";

/// Floor for `SettleInterval`, so a zero interval cannot spin on `sv`.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A service managed by runit.
///
/// Building one only computes paths; the filesystem and `sv` are touched by
/// the lifecycle calls alone.
pub struct RunitService<B = SvBridge> {
    config: Config,
    registration: Registration,
    settle: Settle,
    bridge: B,
}

impl RunitService<SvBridge> {
    pub fn new(config: Config, settings: RunitSettings) -> Self {
        let registration = Registration::new(&settings, &config.name);
        let settle = settings
            .settle
            .unwrap_or_else(|| Settle::from_config(&config));
        RunitService {
            bridge: SvBridge::new(settings.control_binary),
            config,
            registration,
            settle,
        }
    }
}

impl<B: ControlBridge> RunitService<B> {
    /// Swap the control bridge, e.g. for a stub in tests.
    pub fn with_bridge<C: ControlBridge>(self, bridge: C) -> RunitService<C> {
        RunitService {
            config: self.config,
            registration: self.registration,
            settle: self.settle,
            bridge,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn settle(&self) -> Settle {
        self.settle
    }

    fn reject_user_service(&self) -> Result<(), ServiceError> {
        if self
            .config
            .options
            .bool(OPTION_USER_SERVICE, OPTION_USER_SERVICE_DEFAULT)
        {
            return Err(ServiceError::UnsupportedFeature(
                "user services are not supported by runit",
            ));
        }
        Ok(())
    }

    fn render_scripts(
        &self,
        run: &ScriptTemplate,
        log: Option<&ScriptTemplate>,
    ) -> Result<Scripts, ServiceError> {
        let exec_path = self.config.exec_path()?;
        let ctx = ScriptContext::new(&self.config, &exec_path)?;
        Ok(Scripts {
            run: run.render(&ctx)?,
            log: log.map(|tpl| tpl.render(&ctx)).transpose()?,
        })
    }

    /// Output of `sv status`.
    ///
    /// A non-zero exit only counts as an answer when it still reports a
    /// `run:` / `down:` line; anything else means sv could not reach the
    /// service and becomes [`ServiceError::CommandFailed`].
    fn status_output(&self) -> Result<String, ServiceError> {
        let target = &self.registration.live_link;
        let out = self.bridge.invoke(Verb::Status, target)?;
        if out.success() || status::recognised(&out.output).is_some() {
            return Ok(out.output);
        }
        Err(out.into_failure(self.bridge.binary(), Verb::Status, target))
    }

    /// Wait for runsv to start supervising the freshly linked directory.
    ///
    /// While runsv is still starting, `sv status` exits non-zero with a
    /// `fail:` or `warning:` line; that is polled through. Only a bridge
    /// error (binary missing, killed by a signal) aborts early.
    fn wait_until_settled(&self) -> Result<(), ServiceError> {
        let (timeout, interval) = match self.settle {
            Settle::Fixed(delay) => {
                thread::sleep(delay);
                return Ok(());
            }
            Settle::Poll { timeout, interval } => (timeout, interval.max(MIN_POLL_INTERVAL)),
        };

        let target = &self.registration.live_link;
        let started = Instant::now();
        loop {
            let out = self.bridge.invoke(Verb::Status, target)?;
            let status = if out.success() {
                Some(status::interpret(&out.output))
            } else {
                status::recognised(&out.output)
            };
            if let Some(status) = status.filter(|s| s.is_settled()) {
                tracing::debug!(%status, waited = ?started.elapsed(), "supervisor settled");
                return Ok(());
            }
            let waited = started.elapsed();
            if waited >= timeout {
                return Err(ServiceError::TimedOut {
                    target: target.clone(),
                    waited,
                });
            }
            thread::sleep(interval.min(timeout - waited));
        }
    }
}

impl<B: ControlBridge> Service for RunitService<B> {
    fn platform(&self) -> &str {
        PLATFORM
    }

    fn display_name(&self) -> &str {
        self.config.display()
    }

    fn install(&self) -> Result<(), ServiceError> {
        self.reject_user_service()?;

        let run = ScriptTemplate::run_script(&self.config)?;
        let log = if self
            .config
            .options
            .bool(OPTION_LOG_OUTPUT, OPTION_LOG_OUTPUT_DEFAULT)
        {
            Some(ScriptTemplate::log_script(&self.config)?)
        } else {
            None
        };

        registration::install(&self.registration, || {
            self.render_scripts(&run, log.as_ref())
        })?;
        self.wait_until_settled()
    }

    fn uninstall(&self) -> Result<(), ServiceError> {
        self.reject_user_service()?;
        registration::uninstall(&self.registration)
    }

    fn start(&self) -> Result<(), ServiceError> {
        act(&self.bridge, Verb::Up, &self.registration.live_link)
    }

    fn stop(&self) -> Result<(), ServiceError> {
        act(&self.bridge, Verb::Down, &self.registration.live_link)
    }

    fn restart(&self) -> Result<(), ServiceError> {
        act(&self.bridge, Verb::Restart, &self.registration.live_link)
    }

    fn status(&self) -> Result<Status, ServiceError> {
        Ok(status::interpret(&self.status_output()?))
    }

    fn pid(&self) -> Result<u32, ServiceError> {
        status::parse_pid(&self.status_output()?)
    }

    fn run(&self, program: &mut dyn Program) -> Result<(), ServiceError> {
        runner::run(program, self.config.options.run_wait())
    }

    fn logger(&self) -> Logger {
        Logger::for_host(self.config.name.0.clone())
    }
}
