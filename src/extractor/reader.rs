//! Pull-based line reader over a log file.
//!
//! The file is opened on the first poll and read one line per step, so the
//! consumer's pace bounds how far the read advances. The handle lives in the
//! stream state and is closed when the stream finishes or is dropped.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::{stream, Stream};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::extractor::parser::ErrorLineParser;
use crate::extractor::record::{ExtractFailure, Extracted};

/// Stream ERROR records out of the file at `path`.
///
/// Every call opens the file anew. A read failure yields a single
/// [`Extracted::Failure`] and ends the stream.
pub fn extract(
    path: impl Into<PathBuf>,
    parser: Arc<ErrorLineParser>,
) -> impl Stream<Item = Extracted> + Send + 'static {
    let source = LineSource::new(path.into(), parser);

    stream::unfold(source, |mut source| async move {
        let item = source.next_item().await?;
        Some((item, source))
    })
}

enum Phase {
    Unopened,
    Reading(BufReader<File>),
    Done,
}

struct LineSource {
    requested: PathBuf,
    resolved: PathBuf,
    parser: Arc<ErrorLineParser>,
    phase: Phase,
    line: Vec<u8>,
    // Previous line ended in '\r'; a leading '\n' belongs to that terminator.
    after_cr: bool,
}

impl LineSource {
    fn new(requested: PathBuf, parser: Arc<ErrorLineParser>) -> Self {
        let resolved = std::path::absolute(&requested).unwrap_or_else(|_| requested.clone());
        Self {
            requested,
            resolved,
            parser,
            phase: Phase::Unopened,
            line: Vec::new(),
            after_cr: false,
        }
    }

    async fn next_item(&mut self) -> Option<Extracted> {
        loop {
            match &mut self.phase {
                Phase::Done => return None,
                Phase::Unopened => match File::open(&self.resolved).await {
                    Ok(file) => {
                        tracing::debug!(path = %self.resolved.display(), "Log file opened");
                        self.phase = Phase::Reading(BufReader::new(file));
                    }
                    Err(err) => return Some(self.fail(&err)),
                },
                Phase::Reading(reader) => {
                    self.line.clear();
                    let read = read_line(reader, &mut self.line, &mut self.after_cr).await;
                    match read {
                        Ok(false) => {
                            self.phase = Phase::Done;
                            return None;
                        }
                        Ok(true) => {
                            let text = String::from_utf8_lossy(&self.line);
                            if let Some(record) = self.parser.parse(&text) {
                                return Some(Extracted::Record(record));
                            }
                        }
                        Err(err) => return Some(self.fail(&err)),
                    }
                }
            }
        }
    }

    fn fail(&mut self, err: &io::Error) -> Extracted {
        // Dropping the reader here closes the handle before the failure is handed out.
        self.phase = Phase::Done;
        Extracted::Failure(ExtractFailure::from_io(&self.requested, &self.resolved, err))
    }
}

/// Read one line into `line` without its terminator.
///
/// Returns `false` only at end of file with nothing left to hand out.
async fn read_line(
    reader: &mut BufReader<File>,
    line: &mut Vec<u8>,
    after_cr: &mut bool,
) -> io::Result<bool> {
    loop {
        let (consumed, complete) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                *after_cr = false;
                return Ok(!line.is_empty());
            }

            let skip = usize::from(std::mem::take(after_cr) && available[0] == b'\n');
            let rest = &available[skip..];
            match rest.iter().position(|b| matches!(b, b'\n' | b'\r')) {
                Some(end) => {
                    line.extend_from_slice(&rest[..end]);
                    *after_cr = rest[end] == b'\r';
                    (skip + end + 1, true)
                }
                None => {
                    line.extend_from_slice(rest);
                    (available.len(), false)
                }
            }
        };

        reader.consume(consumed);
        if complete {
            return Ok(true);
        }
    }
}
