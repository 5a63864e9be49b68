//! Turns `sv status` prose into typed results.
//!
//! Every pattern the backend matches against supervisor output lives here.
//! Typical lines:
//!
//! ```text
//! run: /etc/service/web: (pid 1234) 56s; run: log: (pid 1233) 56s
//! down: /etc/service/web: 3s, normally up
//! warning: /etc/service/web: unable to open supervise/ok: file does not exist
//! fail: /etc/service/web: runsv not running
//! ```

use std::sync::OnceLock;

use regex::Regex;

use keeper_core::{ServiceError, Status};

fn pid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"pid ([0-9]+)").expect("pid pattern is valid"))
}

fn log_segment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"; (?:run|down|finish|fail|warning): log:").expect("log pattern is valid")
    })
}

/// The part of the output describing the service itself, without the
/// `; run: log: ...` tail sv appends for an attached log service.
fn main_service(output: &str) -> &str {
    match log_segment_regex().find(output) {
        Some(m) => &output[..m.start()],
        None => output,
    }
}

/// State named by a leading `run:` / `down:` line, if there is one.
///
/// This is the only output that still counts as an answer when `sv status`
/// exits non-zero.
pub fn recognised(output: &str) -> Option<Status> {
    let main = main_service(output).trim_start();
    if main.starts_with("run:") {
        Some(Status::Running)
    } else if main.starts_with("down:") {
        Some(Status::Stopped)
    } else {
        None
    }
}

/// Map the output of a successful `sv status` to a [`Status`].
///
/// `fail:` and `warning:` lines say nothing about the service: `Unknown`.
/// Otherwise the leading state word decides, then any `run` / `down`
/// substring.
pub fn interpret(output: &str) -> Status {
    if let Some(status) = recognised(output) {
        return status;
    }
    let main = main_service(output).trim_start();
    if main.starts_with("fail:") || main.starts_with("warning:") {
        Status::Unknown
    } else if main.contains("run") {
        Status::Running
    } else if main.contains("down") {
        Status::Stopped
    } else {
        Status::Unknown
    }
}

/// Extract the service's process id.
///
/// Exactly one `pid <digits>` token must be present; none, several, zero or
/// a value beyond `u32` is a parse error rather than a guess.
pub fn parse_pid(output: &str) -> Result<u32, ServiceError> {
    let main = main_service(output);
    let mut captures = pid_regex().captures_iter(main);
    let not_found = |what| ServiceError::NotFound {
        what,
        output: output.trim().to_string(),
    };

    let first = captures.next().ok_or_else(|| not_found("pid"))?;
    if captures.next().is_some() {
        return Err(not_found("a single pid"));
    }
    match first[1].parse::<u32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(not_found("a valid pid")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("run: /etc/service/web: (pid 1234) 56s", Status::Running)]
    #[case("run: /etc/service/web: (pid 1234) 56s; run: log: (pid 1233) 56s", Status::Running)]
    #[case("run: /etc/service/web: (pid 1234) 2s, normally down", Status::Running)]
    #[case("down: /etc/service/web: 3s, normally up", Status::Stopped)]
    #[case("down: /etc/service/web: 3s, normally up; run: log: (pid 88) 40s", Status::Stopped)]
    #[case("down: /etc/service/runner: 1s", Status::Stopped)]
    #[case("finish: /etc/service/web: (pid 77) 0s", Status::Unknown)]
    #[case("fail: /etc/service/web: runsv not running", Status::Unknown)]
    #[case(
        "warning: /etc/service/web: unable to open supervise/ok: file does not exist",
        Status::Unknown
    )]
    #[case("", Status::Unknown)]
    #[case("run", Status::Running)]
    #[case("service is down", Status::Stopped)]
    #[case("something else entirely", Status::Unknown)]
    fn interprets_status_output(#[case] output: &str, #[case] expected: Status) {
        assert_eq!(interpret(output), expected);
    }

    #[rstest]
    #[case("run: /etc/service/web: (pid 1234) 56s; down: log: 3s", Some(Status::Running))]
    #[case("  down: /etc/service/web: 3s, normally up", Some(Status::Stopped))]
    #[case("fail: /etc/service/web: runsv not running", None)]
    #[case("warning: /etc/service/web: unable to open supervise/ok", None)]
    #[case("service is down", None)]
    #[case("", None)]
    fn recognises_only_leading_state_lines(
        #[case] output: &str,
        #[case] expected: Option<Status>,
    ) {
        assert_eq!(recognised(output), expected);
    }

    #[rstest]
    #[case("pid 1234", 1234)]
    #[case("run: /etc/service/web: (pid 1234) 56s", 1234)]
    #[case("run: /etc/service/web: (pid 42) 1s; run: log: (pid 41) 1s", 42)]
    #[case("run: web: (pid 4294967295) 1s", u32::MAX)]
    fn parses_pid(#[case] output: &str, #[case] expected: u32) {
        assert_eq!(parse_pid(output).unwrap(), expected);
    }

    #[rstest]
    #[case("down: /etc/service/web: 3s, normally up")]
    #[case("")]
    #[case("pid 1 pid 2")]
    #[case("pid 0")]
    #[case("pid 4294967296")]
    #[case("pid abc")]
    fn rejects_missing_ambiguous_or_invalid_pids(#[case] output: &str) {
        let err = parse_pid(output).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }), "got: {err}");
    }
}
