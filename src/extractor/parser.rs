//! ERROR line recognition.

use regex::Regex;

use crate::extractor::record::LogRecord;

/// Marker a line must contain before the structural pattern is tried.
pub const ERROR_MARKER: &str = "ERROR";

// `timestamp` stops at the first " [", `level` is ASCII word characters.
const LINE_PATTERN: &str =
    r"^(?P<timestamp>.+?) \[(?P<level>[A-Za-z0-9_]+)\] (?P<message>.*)$";

/// Turns raw log lines into [`LogRecord`]s.
///
/// Built once at startup and shared by every GET request.
#[derive(Debug, Clone)]
pub struct ErrorLineParser {
    pattern: Regex,
}

impl ErrorLineParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LINE_PATTERN).expect("line pattern is a valid regex"),
        }
    }

    /// Parse a single line (without its terminator).
    ///
    /// Returns `None` for lines without the ERROR marker and for ERROR lines
    /// that do not have the `<timestamp> [<level>] <message>` shape.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        if !line.contains(ERROR_MARKER) {
            return None;
        }

        let caps = self.pattern.captures(line)?;
        Some(LogRecord {
            timestamp: caps["timestamp"].to_string(),
            level: caps["level"].to_string(),
            message: caps["message"].to_string(),
        })
    }
}

impl Default for ErrorLineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_error_line_verbatim() {
        let parser = ErrorLineParser::new();
        let record = parser.parse("2024-01-01T00:00:00 [ERROR] disk full").unwrap();

        assert_eq!(record.timestamp, "2024-01-01T00:00:00");
        assert_eq!(record.level, "ERROR");
        assert_eq!(record.message, "disk full");
    }

    #[test]
    fn test_skips_lines_without_marker() {
        let parser = ErrorLineParser::new();
        assert!(parser.parse("2024-01-01T00:00:00 [INFO] started").is_none());
        assert!(parser.parse("2024-01-01T00:00:00 [error] lowercase").is_none());
        assert!(parser.parse("").is_none());
    }

    #[test]
    fn test_skips_unstructured_error_line() {
        let parser = ErrorLineParser::new();
        assert!(parser.parse("ERROR something went wrong").is_none());
        assert!(parser.parse("[ERROR] missing timestamp").is_none());
    }

    #[test]
    fn test_marker_may_appear_only_in_message() {
        let parser = ErrorLineParser::new();
        let record = parser
            .parse("10:00:01 [WARN] retrying after ERROR from upstream")
            .unwrap();

        assert_eq!(record.level, "WARN");
        assert_eq!(record.message, "retrying after ERROR from upstream");
    }

    #[test]
    fn test_no_trimming_and_lazy_timestamp() {
        let parser = ErrorLineParser::new();
        let record = parser
            .parse("Jan 1 00:00 [ERROR]   padded [x] tail  ")
            .unwrap();

        assert_eq!(record.timestamp, "Jan 1 00:00");
        assert_eq!(record.message, "  padded [x] tail  ");
    }

    #[test]
    fn test_empty_message_allowed() {
        let parser = ErrorLineParser::new();
        let record = parser.parse("t [ERROR] ").unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_level_must_be_word_characters() {
        let parser = ErrorLineParser::new();
        assert!(parser.parse("t [ERR-OR] ERROR text").is_none());
    }
}
