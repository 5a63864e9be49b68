//! Open-ended per-service options with typed accessors.
//!
//! Values come from the `options:` mapping of a service config file or from
//! [`Options::set`]. Every accessor takes the default to fall back on when the
//! key is absent or holds a value of another type; the documented defaults
//! live next to each key constant below.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Install as a per-user service instead of a system one.
pub const OPTION_USER_SERVICE: &str = "UserService";
pub const OPTION_USER_SERVICE_DEFAULT: bool = false;

/// Tera source that fully replaces the default runit `run` script.
pub const OPTION_RUNIT_SCRIPT: &str = "RunitScript";

/// Tera source that fully replaces the default runit `log/run` script.
pub const OPTION_RUNIT_LOG_SCRIPT: &str = "RunitLogScript";

/// Register a companion log service that captures the service's output.
pub const OPTION_LOG_OUTPUT: &str = "LogOutput";
pub const OPTION_LOG_OUTPUT_DEFAULT: bool = false;

/// Upper bound on how long install waits for the supervisor to pick up a new service.
pub const OPTION_SETTLE_TIMEOUT: &str = "SettleTimeout";
pub const OPTION_SETTLE_TIMEOUT_DEFAULT: Duration = Duration::from_secs(6);

/// Delay between status probes while install waits.
pub const OPTION_SETTLE_INTERVAL: &str = "SettleInterval";
pub const OPTION_SETTLE_INTERVAL_DEFAULT: Duration = Duration::from_millis(250);

/// Name under which a custom foreground wait strategy is reported in logs.
pub const OPTION_RUN_WAIT: &str = "RunWait";

/// A single option value as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Caller-supplied strategy that blocks until the foreground run should stop.
#[derive(Clone)]
pub struct RunWait(Arc<dyn Fn() + Send + Sync>);

impl RunWait {
    pub fn new(wait: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(wait))
    }

    /// Block the current thread until the strategy returns.
    pub fn wait(&self) {
        (self.0)()
    }
}

impl fmt::Debug for RunWait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RunWait(..)")
    }
}

/// Key/value options attached to a [`crate::Config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
    #[serde(skip)]
    run_wait: Option<RunWait>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replace the default signal wait used by a foreground run.
    ///
    /// Only one strategy is kept; a second call replaces the first.
    pub fn with_run_wait(mut self, wait: RunWait) -> Self {
        self.run_wait = Some(wait);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(OptionValue::Bool(v)) => *v,
            _ => default,
        }
    }

    pub fn int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(OptionValue::Int(v)) => *v,
            _ => default,
        }
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(OptionValue::Str(v)) => v.clone(),
            _ => default.to_owned(),
        }
    }

    /// Integers are whole seconds; strings take a unit suffix (`ms`, `s`, `m`, `h`).
    pub fn duration(&self, key: &str, default: Duration) -> Duration {
        match self.values.get(key) {
            Some(OptionValue::Int(secs)) if *secs >= 0 => Duration::from_secs(*secs as u64),
            Some(OptionValue::Str(s)) => parse_duration(s).unwrap_or(default),
            _ => default,
        }
    }

    pub fn run_wait(&self) -> Option<&RunWait> {
        self.run_wait.as_ref()
    }
}

/// Parse `"250ms"`, `"6s"`, `"2m"`, `"1h"` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let n: u64 = digits.parse().ok()?;
    match unit.trim() {
        "" | "s" => Some(Duration::from_secs(n)),
        "ms" => Some(Duration::from_millis(n)),
        "m" => n.checked_mul(60).map(Duration::from_secs),
        "h" => n.checked_mul(3600).map(Duration::from_secs),
        _ => None,
    }
}
