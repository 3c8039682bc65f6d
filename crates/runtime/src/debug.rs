//! Flag-gated debug printer for pipeline artifacts.
//!
//! Entries look like:
//!
//! ```text
//! DEBUG  # TOOL INVOKED:
//! DEBUG  | {
//! DEBUG  |   "name": "add",
//! DEBUG  | ...
//! ```
//!
//! The `DEBUG ` tag is rendered reverse black-on-blue.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use owo_colors::{OwoColorize, Style};
use serde_json::Value;

/// Level value that enables debug output.
pub const DEBUG_LEVEL: &str = "DEBUG";

const TAG: &str = "DEBUG ";

type Sink = Arc<Mutex<dyn Write + Send>>;

/// Debug printer. Configured once at startup and never mutated afterwards.
///
/// A disabled logger holds no sink and writes nothing.
#[derive(Clone, Default)]
pub struct DebugLog {
    sink: Option<Sink>,
}

impl DebugLog {
    /// Logger writing to stdout when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(enabled, io::stdout())
    }

    /// Logger writing to `writer` when `enabled`.
    pub fn with_writer(enabled: bool, writer: impl Write + Send + 'static) -> Self {
        let sink: Option<Sink> = enabled.then(|| Arc::new(Mutex::new(writer)) as Sink);
        Self { sink }
    }

    /// A disabled logger.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled only when `level` is exactly `DEBUG`.
    pub fn from_level(level: &str) -> Self {
        Self::new(level == DEBUG_LEVEL)
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Log a JSON payload.
    pub fn log(&self, title: &str, payload: &Value) {
        if self.is_enabled() {
            self.emit(title, &render(payload));
        }
    }

    /// Log a text payload.
    pub fn log_text(&self, title: &str, text: &str) {
        self.emit(title, text);
    }

    // Write failures are dropped: debug output never affects control flow.
    fn emit(&self, title: &str, body: &str) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Ok(mut out) = sink.lock() {
            let _ = write_entry(&mut *out, title, body);
        }
    }
}

impl std::fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn write_entry(out: &mut dyn Write, title: &str, body: &str) -> io::Result<()> {
    let tag = TAG.style(tag_style());
    writeln!(out, "{tag} # {title}: ")?;
    for line in body.split('\n') {
        writeln!(out, "{tag} | {line}")?;
    }
    out.flush()
}

fn tag_style() -> Style {
    Style::new().reversed().black().on_blue()
}

/// Strings print as-is; everything else as indented JSON.
pub fn render(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// In-memory writer for inspecting debug output in tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::Captured;
    use super::*;
    use serde_json::json;

    fn logger(enabled: bool) -> (DebugLog, Captured) {
        let out = Captured::default();
        (DebugLog::with_writer(enabled, out.clone()), out)
    }

    #[test]
    fn disabled_writes_nothing() {
        let (log, out) = logger(false);
        log.log("TOOL INVOKED", &json!({"name": "add"}));
        log.log_text("SYSTEM_PROMPT", "text");
        assert_eq!(out.text(), "");
        assert!(!log.is_enabled());
    }

    #[test]
    fn only_debug_level_enables() {
        assert!(DebugLog::from_level("DEBUG").is_enabled());
        assert!(!DebugLog::from_level("INFO").is_enabled());
        assert!(!DebugLog::from_level("debug").is_enabled());
        assert!(!DebugLog::from_level("").is_enabled());
    }

    #[test]
    fn mapping_payload_is_indented_json() {
        let (log, out) = logger(true);
        log.log("TOOL RESPONSE", &json!({"result": 5}));

        let out = out.text();
        assert!(out.contains("TOOL RESPONSE"));
        assert!(out.contains("| {\n"));
        assert!(out.contains(r#"|   "result": 5"#));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn every_line_is_tagged() {
        let (log, out) = logger(true);
        log.log_text("SYSTEM_PROMPT", "one\ntwo");

        let out = out.text();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.contains(TAG)));
        assert!(lines[1].ends_with("| one"));
        assert!(lines[2].ends_with("| two"));
    }

    #[test]
    fn clones_share_the_sink() {
        let (log, out) = logger(true);
        log.clone().log_text("A", "1");
        log.log_text("B", "2");
        let out = out.text();
        assert!(out.find("# A:").unwrap() < out.find("# B:").unwrap());
    }

    #[test]
    fn string_payload_is_printed_raw() {
        assert_eq!(render(&json!("plain")), "plain");
        assert_eq!(render(&json!(3)), "3");
    }
}
