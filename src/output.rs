use std::sync::OnceLock;

use serde::Serialize;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `CRUDEWATCH_QUIET=1` suppresses banners and decorative output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("CRUDEWATCH_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

/// Print `data` as pretty JSON under a `command` envelope
pub fn emit_json<T: Serialize>(command: &str, data: &T) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
