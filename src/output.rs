//! How command results reach the terminal
//!
//! Human mode prints themed lines; JSON mode prints one envelope per command
//! (`{"ok": true, "command", "data"}` or `{"ok": false, "error"}`) so scripts
//! can tell a miss (`found: false`) from a failure.

use std::sync::OnceLock;
use serde_json::{Value, json};

static QUIET: OnceLock<bool> = OnceLock::new();

/// `ICFINDER_QUIET` hides spinners and other decoration in human mode
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| quiet_from(std::env::var("ICFINDER_QUIET").ok().as_deref()))
}

fn quiet_from(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }

    /// Whether spinners may be drawn
    pub fn decorated(self) -> bool {
        self.is_human() && !is_quiet()
    }
}

pub fn success_envelope(command: &str, data: Value) -> Value {
    json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

pub fn error_envelope(message: &str) -> Value {
    json!({ "ok": false, "error": message })
}

/// Print the JSON envelope for `command`; a no-op in human mode
pub fn emit_success(mode: OutputMode, command: &str, data: Value) -> serde_json::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data))?);
    }
    Ok(())
}
