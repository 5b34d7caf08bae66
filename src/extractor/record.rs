//! Items produced by the extractor.

use std::io;
use std::path::Path;

use serde::Serialize;

/// One ERROR entry captured from a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Terminal read failure reported in place of further records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractFailure {
    /// Errno-style code (e.g. `ENOENT`) when the error has a known name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    pub original_error: String,
}

impl ExtractFailure {
    /// Describe a failure to read `requested` (as given) at `resolved`.
    pub fn from_io(requested: &Path, resolved: &Path, err: &io::Error) -> Self {
        let message = if err.kind() == io::ErrorKind::NotFound {
            format!(
                "Error. File {} cannot be found in directory {}",
                requested.display(),
                resolved.display()
            )
        } else {
            "Unexpected error occured.".to_string()
        };

        Self {
            code: errno_code(err),
            message,
            original_error: err.to_string(),
        }
    }
}

fn errno_code(err: &io::Error) -> Option<String> {
    if let Some(name) = err.raw_os_error().and_then(os_errno_name) {
        return Some(name);
    }

    use io::ErrorKind::*;

    let name = match err.kind() {
        NotFound => "ENOENT",
        PermissionDenied => "EACCES",
        IsADirectory => "EISDIR",
        NotADirectory => "ENOTDIR",
        Interrupted => "EINTR",
        OutOfMemory => "ENOMEM",
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(unix)]
fn os_errno_name(raw: i32) -> Option<String> {
    use nix::errno::Errno;

    match Errno::from_raw(raw) {
        Errno::UnknownErrno => None,
        // Debug prints the symbolic name, e.g. `EIO`.
        errno => Some(format!("{errno:?}")),
    }
}

#[cfg(not(unix))]
fn os_errno_name(_raw: i32) -> Option<String> {
    None
}

/// Element type of the extractor stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Extracted {
    Record(LogRecord),
    Failure(ExtractFailure),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_record_serializes_as_flat_object() {
        let record = LogRecord {
            timestamp: "2024-01-01T00:00:00".into(),
            level: "ERROR".into(),
            message: "disk full".into(),
        };

        assert_eq!(
            serde_json::to_string(&Extracted::Record(record)).unwrap(),
            r#"{"timestamp":"2024-01-01T00:00:00","level":"ERROR","message":"disk full"}"#
        );
    }

    #[test]
    fn test_not_found_failure_names_both_paths() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let failure = ExtractFailure::from_io(
            Path::new("logs.txt"),
            &PathBuf::from("/srv/app/logs.txt"),
            &err,
        );

        assert_eq!(failure.code.as_deref(), Some("ENOENT"));
        assert_eq!(
            failure.message,
            "Error. File logs.txt cannot be found in directory /srv/app/logs.txt"
        );
        assert_eq!(failure.original_error, "No such file or directory");

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["originalError"], "No such file or directory");
    }

    #[cfg(unix)]
    #[test]
    fn test_os_errors_keep_their_errno_name() {
        let failure_for = |raw| {
            ExtractFailure::from_io(Path::new("a"), Path::new("/a"), &io::Error::from_raw_os_error(raw))
        };

        let eio = failure_for(5);
        assert_eq!(eio.code.as_deref(), Some("EIO"));
        assert_eq!(eio.message, "Unexpected error occured.");

        assert_eq!(failure_for(24).code.as_deref(), Some("EMFILE"));

        let enoent = failure_for(2);
        assert_eq!(enoent.code.as_deref(), Some("ENOENT"));
        assert!(enoent.message.starts_with("Error. File a cannot be found"));
    }

    #[test]
    fn test_other_failure_uses_generic_message() {
        let err = io::Error::other("device went away");
        let failure = ExtractFailure::from_io(Path::new("a"), Path::new("/a"), &err);

        assert_eq!(failure.code, None);
        assert_eq!(failure.message, "Unexpected error occured.");

        let json = serde_json::to_string(&failure).unwrap();
        assert!(!json.contains("code"));
    }
}
