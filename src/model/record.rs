//! Structured log records retrieved from the command's log stream.
//!
//! Elsa Data logs pino-style JSON lines, but the stream also carries plain
//! `console.log` output from the executed command. Each line is classified
//! independently: valid JSON objects become [`LogRecord`]s, everything else
//! passes through as opaque text.
//!
//! Numeric fields are extracted as `i64` so epoch-millisecond timestamps are
//! never routed through floating point.

use serde_json::{Map, Value};

/// The six well-known pino fields suppressed from residual pretty-printing.
pub const RESERVED_KEYS: [&str; 6] = ["level", "msg", "name", "hostname", "time", "pid"];

/// A record with more top-level fields than this carries residual payload
/// worth surfacing.
pub const RESIDUAL_THRESHOLD: usize = 6;

/// One log line, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    /// Not a JSON object - plain output written by the executed command.
    Plain(String),
    /// A structured logger emission.
    Structured(LogRecord),
}

/// Classify a raw log line.
///
/// Only JSON *objects* count as structured; arrays, scalars, and malformed
/// JSON are all treated as plain text.
pub fn parse_line(line: &str) -> LogLine {
    match serde_json::from_str::<Map<String, Value>>(line) {
        Ok(fields) => LogLine::Structured(LogRecord { fields }),
        Err(_) => LogLine::Plain(line.to_string()),
    }
}

/// A decoded structured log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    fields: Map<String, Value>,
}

impl LogRecord {
    /// Build a record directly from its fields. Intended for tests.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Epoch milliseconds from the `time` field, if present and integral.
    pub fn time_millis(&self) -> Option<i64> {
        self.fields.get("time").and_then(Value::as_i64)
    }

    /// Numeric `level` field, if present and integral.
    pub fn level(&self) -> Option<i64> {
        self.fields.get("level").and_then(Value::as_i64)
    }

    /// The `msg` field rendered as text.
    ///
    /// Missing `msg` renders as an empty string; a non-string value renders
    /// via its JSON representation.
    pub fn msg(&self) -> String {
        match self.fields.get("msg") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Residual fields beyond the well-known set, if the record is large
    /// enough to carry any.
    ///
    /// The trigger is purely the total field count exceeding
    /// [`RESIDUAL_THRESHOLD`]; it does not verify which reserved keys were
    /// actually present before subtracting them. A record with seven unknown
    /// fields and none of the reserved ones still residual-prints, with
    /// nothing removed. This matches the deployed behavior and is kept as-is.
    pub fn residual(&self) -> Option<Map<String, Value>> {
        if self.fields.len() <= RESIDUAL_THRESHOLD {
            return None;
        }
        let mut rest = self.fields.clone();
        for key in RESERVED_KEYS {
            rest.remove(key);
        }
        Some(rest)
    }
}

/// Severity decoded from a pino numeric level.
///
/// Levels are matched exactly (10, 20, 30, 40, 50, 60); anything else is
/// [`Severity::Unknown`] and rendered with the likely-error color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// A level value outside the known set.
    Unknown,
}

impl Severity {
    /// Map a numeric level to a severity.
    pub fn from_level(level: i64) -> Self {
        match level {
            10 => Severity::Trace,
            20 => Severity::Debug,
            30 => Severity::Info,
            40 => Severity::Warn,
            50 => Severity::Error,
            60 => Severity::Fatal,
            _ => Severity::Unknown,
        }
    }

    /// Fixed five-character label, space-padded so message columns align.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO ",
            Severity::Warn => "WARN ",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Unknown => "?????",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> LogRecord {
        match value {
            Value::Object(fields) => LogRecord::from_fields(fields),
            other => panic!("test record must be an object, got {other}"),
        }
    }

    // ===== parse_line =====

    #[test]
    fn parse_line_object_is_structured() {
        let line = r#"{"level":30,"msg":"hello"}"#;
        assert!(matches!(parse_line(line), LogLine::Structured(_)));
    }

    #[test]
    fn parse_line_plain_text_passes_through() {
        let line = "plain stdout text";
        assert_eq!(parse_line(line), LogLine::Plain(line.to_string()));
    }

    #[test]
    fn parse_line_json_array_is_plain() {
        let line = r#"[1,2,3]"#;
        assert_eq!(parse_line(line), LogLine::Plain(line.to_string()));
    }

    #[test]
    fn parse_line_json_scalar_is_plain() {
        assert_eq!(parse_line("42"), LogLine::Plain("42".to_string()));
    }

    // ===== field extraction =====

    #[test]
    fn time_millis_preserves_large_epoch_exactly() {
        let rec = record(json!({"time": 1700000000123_i64}));
        assert_eq!(rec.time_millis(), Some(1_700_000_000_123));
    }

    #[test]
    fn time_millis_none_for_non_numeric_time() {
        let rec = record(json!({"time": "yesterday"}));
        assert_eq!(rec.time_millis(), None);
    }

    #[test]
    fn time_millis_none_for_float_time() {
        // Fractional timestamps are not integral epoch millis.
        let rec = record(json!({"time": 1.7e12}));
        assert_eq!(rec.time_millis(), None);
    }

    #[test]
    fn level_none_when_absent() {
        let rec = record(json!({"msg": "no level"}));
        assert_eq!(rec.level(), None);
    }

    #[test]
    fn msg_missing_renders_empty() {
        let rec = record(json!({"level": 30}));
        assert_eq!(rec.msg(), "");
    }

    #[test]
    fn msg_non_string_renders_as_json() {
        let rec = record(json!({"msg": 7}));
        assert_eq!(rec.msg(), "7");
    }

    // ===== residual =====

    #[test]
    fn residual_none_at_exactly_six_fields() {
        let rec = record(json!({
            "level": 30, "msg": "m", "name": "n",
            "hostname": "h", "time": 1, "pid": 2
        }));
        assert!(rec.residual().is_none(), "six fields must not trigger residuals");
    }

    #[test]
    fn residual_contains_only_non_reserved_keys() {
        let rec = record(json!({
            "level": 30, "msg": "m", "name": "n", "hostname": "h",
            "time": 1, "pid": 2, "requestId": "r-1", "durationMs": 42
        }));
        let rest = rec.residual().expect("eight fields trigger residuals");
        assert_eq!(rest.len(), 2);
        assert!(rest.contains_key("requestId"));
        assert!(rest.contains_key("durationMs"));
    }

    #[test]
    fn residual_triggers_without_reserved_keys_present() {
        // Seven unrelated fields: nothing gets removed, but the block still
        // prints. Deployed behavior, preserved.
        let rec = record(json!({
            "a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 7
        }));
        let rest = rec.residual().expect("seven fields trigger residuals");
        assert_eq!(rest.len(), 7);
    }

    // ===== Severity =====

    #[test]
    fn severity_maps_known_levels() {
        assert_eq!(Severity::from_level(10), Severity::Trace);
        assert_eq!(Severity::from_level(20), Severity::Debug);
        assert_eq!(Severity::from_level(30), Severity::Info);
        assert_eq!(Severity::from_level(40), Severity::Warn);
        assert_eq!(Severity::from_level(50), Severity::Error);
        assert_eq!(Severity::from_level(60), Severity::Fatal);
    }

    #[test]
    fn severity_unrecognized_level_is_unknown() {
        assert_eq!(Severity::from_level(25), Severity::Unknown);
        assert_eq!(Severity::Unknown.label(), "?????");
    }

    #[test]
    fn severity_labels_are_fixed_width() {
        for sev in [
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
            Severity::Unknown,
        ] {
            assert_eq!(sev.label().len(), 5, "label {:?} must be 5 chars", sev);
        }
    }
}
