//! POSIX shell quoting for values spliced into generated scripts.

use std::borrow::Cow;
use std::collections::HashMap;

use tera::{to_value, try_get_value, Value};

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote `s` so `/bin/sh` reads it back as exactly one word.
///
/// Words made only of `[A-Za-z0-9_@%+=:,./-]` are returned untouched; anything
/// else is wrapped in single quotes with embedded quotes spelled `'\''`.
pub fn shell_escape(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_safe) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    Cow::Owned(out)
}

/// Tera filter wrapper: `{{ path | shell_escape }}`.
pub(crate) fn shell_escape_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = try_get_value!("shell_escape", "value", String, value);
    Ok(to_value(shell_escape(&s).into_owned())?)
}
