//! Pure log line formatting.
//!
//! Every function here maps input text to output text; printing happens at
//! the pipeline boundary. That keeps the formatter unit-testable without
//! capturing the real console.
//!
//! Layout invariant: the message column starts at the same offset on every
//! line. A structured line is `<time prefix><label or blank> <msg>`, where
//! the time prefix is `[HH:MM:SS.ff] ` or an equal-width blank, and the label
//! slot is five characters (or an equal-width blank) plus one space.

use crate::model::record::{parse_line, LogLine, LogRecord, Severity};
use chrono::{Local, TimeZone, Utc};
use colored::Colorize;
use serde_json::{Map, Value};

/// Width of the `[HH:MM:SS.ff] ` prefix, including the trailing space.
pub const TIME_PREFIX_WIDTH: usize = 14;

/// Indentation for plain (non-JSON) output lines.
const PLAIN_INDENT: &str = "      ";

/// Per-line indentation for the residual JSON block.
const RESIDUAL_INDENT: &str = "      ";

/// Format one retrieved log event into its display form (no trailing newline).
///
/// Non-JSON lines pass through unmodified apart from a fixed indent - these
/// are plain print statements from the executed command, not logger output.
pub fn format_event(message: &str) -> String {
    match parse_line(message) {
        LogLine::Plain(text) => format!("{PLAIN_INDENT}{text}"),
        LogLine::Structured(record) => format_record(&record),
    }
}

fn format_record(record: &LogRecord) -> String {
    let mut out = String::new();
    out.push_str(&time_prefix(record.time_millis()));

    match record.level() {
        Some(level) => {
            let severity = Severity::from_level(level);
            out.push_str(&paint_label(severity));
            out.push(' ');
        }
        // Blank slot the width of a label plus its trailing space.
        None => out.push_str("      "),
    }

    out.push_str(&record.msg());

    if let Some(residual) = record.residual() {
        out.push('\n');
        out.push_str(&pretty_residual(&residual));
    }

    out
}

/// Render the `[HH:MM:SS.ff] ` prefix in local wall-clock time, or an
/// equal-width blank when no usable timestamp is present.
fn time_prefix(epoch_millis: Option<i64>) -> String {
    let instant = epoch_millis.and_then(|millis| Utc.timestamp_millis_opt(millis).single());
    match instant {
        Some(utc) => {
            let local = utc.with_timezone(&Local);
            let centis = local.timestamp_subsec_millis() / 10;
            format!("[{}.{:02}] ", local.format("%H:%M:%S"), centis)
        }
        None => " ".repeat(TIME_PREFIX_WIDTH),
    }
}

/// Color a severity label. Distinct color per class; unknown levels share the
/// likely-error red.
fn paint_label(severity: Severity) -> String {
    let label = severity.label();
    match severity {
        Severity::Trace | Severity::Debug => label.green().to_string(),
        Severity::Info => label.blue().to_string(),
        Severity::Warn => label.cyan().to_string(),
        Severity::Error => label.yellow().to_string(),
        Severity::Fatal | Severity::Unknown => label.red().to_string(),
    }
}

/// Pretty-print residual fields as an indented JSON block.
fn pretty_residual(residual: &Map<String, Value>) -> String {
    // Map serialization cannot fail; fall back to compact Display if it
    // somehow does rather than aborting a log dump over formatting.
    let pretty = serde_json::to_string_pretty(residual)
        .unwrap_or_else(|_| Value::Object(residual.clone()).to_string());
    pretty
        .lines()
        .map(|line| format!("{RESIDUAL_INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn without_color<T>(test: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        let result = test();
        colored::control::unset_override();
        result
    }

    #[test]
    #[serial(colored_override)]
    fn plain_line_passes_through_with_fixed_indent() {
        let out = without_color(|| format_event("plain stdout text"));
        assert_eq!(out, "      plain stdout text");
    }

    #[test]
    #[serial(colored_override)]
    fn structured_line_has_time_label_and_message() {
        let line = r#"{"level":30,"msg":"hello","time":1700000000000}"#;
        let out = without_color(|| format_event(line));

        assert!(out.contains("INFO"), "expected INFO label in {out:?}");
        assert!(out.contains("hello"), "expected message in {out:?}");

        // Prefix derived from exactly that millisecond value.
        let local = Utc
            .timestamp_millis_opt(1_700_000_000_000)
            .single()
            .expect("valid epoch")
            .with_timezone(&Local);
        let expected_prefix = format!("[{}.00] ", local.format("%H:%M:%S"));
        assert!(
            out.starts_with(&expected_prefix),
            "expected prefix {expected_prefix:?} in {out:?}"
        );
    }

    #[test]
    #[serial(colored_override)]
    fn formatting_is_deterministic() {
        let line = r#"{"level":30,"msg":"hello","time":1700000000000}"#;
        let (first, second) = without_color(|| (format_event(line), format_event(line)));
        assert_eq!(first, second, "re-running formatting must be byte-identical");
    }

    #[test]
    #[serial(colored_override)]
    fn missing_time_uses_equal_width_blank_prefix() {
        let timed = without_color(|| format_event(r#"{"level":30,"msg":"a","time":1700000000000}"#));
        let untimed = without_color(|| format_event(r#"{"level":30,"msg":"a"}"#));

        let timed_offset = timed.find("INFO").expect("label present");
        let untimed_offset = untimed.find("INFO").expect("label present");
        assert_eq!(
            timed_offset, untimed_offset,
            "message column must not shift when the timestamp is absent"
        );
        assert_eq!(timed_offset, TIME_PREFIX_WIDTH);
    }

    #[test]
    #[serial(colored_override)]
    fn missing_level_indents_to_label_width() {
        let labelled = without_color(|| format_event(r#"{"level":30,"msg":"a"}"#));
        let unlabelled = without_color(|| format_event(r#"{"msg":"a"}"#));

        let labelled_offset = labelled.rfind('a').expect("message present");
        let unlabelled_offset = unlabelled.rfind('a').expect("message present");
        assert_eq!(
            labelled_offset, unlabelled_offset,
            "message column must not shift when the level is absent"
        );
    }

    #[test]
    #[serial(colored_override)]
    fn unknown_level_gets_fallback_label() {
        let out = without_color(|| format_event(r#"{"level":25,"msg":"odd"}"#));
        assert!(out.contains("?????"), "expected ????? label in {out:?}");
        assert!(out.contains("odd"));
    }

    #[test]
    #[serial(colored_override)]
    fn residual_block_lists_only_extra_fields() {
        let line = r#"{"level":30,"msg":"m","name":"n","hostname":"h","time":1700000000000,"pid":9,"requestId":"r-1","durationMs":42}"#;
        let out = without_color(|| format_event(line));

        assert!(out.contains("requestId"), "residual key missing: {out}");
        assert!(out.contains("durationMs"), "residual key missing: {out}");
        assert!(!out.contains("hostname"), "reserved key leaked: {out}");

        // Block lines carry the fixed indent.
        let block_line = out
            .lines()
            .find(|line| line.contains("requestId"))
            .expect("residual line present");
        assert!(block_line.starts_with(RESIDUAL_INDENT));
    }

    #[test]
    #[serial(colored_override)]
    fn six_field_record_has_no_residual_block() {
        let line = r#"{"level":30,"msg":"m","name":"n","hostname":"h","time":1700000000000,"pid":9}"#;
        let out = without_color(|| format_event(line));
        assert_eq!(out.lines().count(), 1, "no residual block expected: {out}");
    }

    #[test]
    #[serial(colored_override)]
    fn huge_timestamp_is_not_corrupted() {
        // 2^53 would lose precision through an f64 path; i64 extraction keeps
        // it exact (and far-future values simply format to some valid time).
        let line = r#"{"level":30,"msg":"far future","time":9007199254740993}"#;
        let out = without_color(|| format_event(line));
        assert!(out.contains("far future"));
    }
}
