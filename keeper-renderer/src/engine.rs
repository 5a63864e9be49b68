//! Tera rendering engine for supervisor launch scripts.

use tera::Tera;

use keeper_core::options::{OPTION_RUNIT_LOG_SCRIPT, OPTION_RUNIT_SCRIPT};
use keeper_core::Config;

use crate::context::ScriptContext;
use crate::error::RenderError;
use crate::escape::shell_escape_filter;

/// Default runit `run` script.
///
/// Without env vars or a user name this renders exactly four lines: shebang,
/// stderr redirect, `cd`, `exec`.
pub const DEFAULT_RUN_SCRIPT: &str = r#"#!/bin/sh
exec 2>&1
{% for var in env_vars %}export {{ var.key }}={{ var.value | shell_escape }}
{% endfor %}cd {{ working_directory | shell_escape }}
exec {% if user_name %}chpst -u {{ user_name | shell_escape }} {% endif %}{{ path | shell_escape }}{% for arg in arguments %} {{ arg | shell_escape }}{% endfor %}
"#;

/// Default runit `log/run` script; svlogd writes into `log/main`.
pub const DEFAULT_LOG_SCRIPT: &str = r#"#!/bin/sh
exec svlogd -tt ./main
"#;

const TEMPLATE_NAME: &str = "script";

/// A single compiled script template.
///
/// Compilation happens up front so a malformed custom script is reported
/// before anything is written to disk.
pub struct ScriptTemplate {
    tera: Tera,
}

impl ScriptTemplate {
    /// Compile `source` as a script template.
    pub fn new(source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.register_filter("shell_escape", shell_escape_filter);
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(ScriptTemplate { tera })
    }

    /// The `run` template for `config`: its `RunitScript` option if set,
    /// otherwise [`DEFAULT_RUN_SCRIPT`]. A custom script replaces the default
    /// outright.
    pub fn run_script(config: &Config) -> Result<Self, RenderError> {
        Self::from_option(config, OPTION_RUNIT_SCRIPT, DEFAULT_RUN_SCRIPT)
    }

    /// The `log/run` template for `config`, honouring `RunitLogScript`.
    pub fn log_script(config: &Config) -> Result<Self, RenderError> {
        Self::from_option(config, OPTION_RUNIT_LOG_SCRIPT, DEFAULT_LOG_SCRIPT)
    }

    fn from_option(config: &Config, key: &str, default: &str) -> Result<Self, RenderError> {
        let custom = config.options.string(key, "");
        if custom.is_empty() {
            Self::new(default)
        } else {
            Self::new(&custom)
        }
    }

    /// Render with `ctx`. Same context in, same bytes out.
    pub fn render(&self, ctx: &ScriptContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(TEMPLATE_NAME, &tera_ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::Options;
    use std::path::Path;

    fn ctx(config: &Config) -> ScriptContext {
        ScriptContext::new(config, Path::new("/srv/web/bin/web")).unwrap()
    }

    #[test]
    fn default_template_compiles() {
        ScriptTemplate::new(DEFAULT_RUN_SCRIPT).expect("default run script");
        ScriptTemplate::new(DEFAULT_LOG_SCRIPT).expect("default log script");
    }

    #[test]
    fn default_script_is_four_lines() {
        let cfg = Config::new("web")
            .with_working_directory("/srv/web")
            .with_arguments(["--port", "8080"]);
        let script = ScriptTemplate::run_script(&cfg).unwrap().render(&ctx(&cfg)).unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "#!/bin/sh",
                "exec 2>&1",
                "cd /srv/web",
                "exec /srv/web/bin/web --port 8080",
            ]
        );
    }

    #[test]
    fn custom_script_replaces_default() {
        let cfg = Config::new("web").with_options(
            Options::new().set(OPTION_RUNIT_SCRIPT, "#!/bin/sh\nexec {{ path }} --custom\n"),
        );
        let script = ScriptTemplate::run_script(&cfg).unwrap().render(&ctx(&cfg)).unwrap();
        assert!(script.contains("exec /srv/web/bin/web --custom"));
        assert!(!script.contains("exec 2>&1"), "default must not be merged in");
    }

    #[test]
    fn malformed_custom_script_fails_to_compile() {
        let cfg = Config::new("web")
            .with_options(Options::new().set(OPTION_RUNIT_SCRIPT, "{% if %}broken"));
        assert!(matches!(
            ScriptTemplate::run_script(&cfg),
            Err(RenderError::Tera(_))
        ));
    }

    #[test]
    fn crlf_never_appears() {
        let cfg = Config::new("web").with_env("A", "1").with_user_name("web");
        let script = ScriptTemplate::run_script(&cfg).unwrap().render(&ctx(&cfg)).unwrap();
        assert!(!script.contains('\r'));
    }
}
