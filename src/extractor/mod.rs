//! Log line extraction subsystem.
//!
//! # Data Flow
//! ```text
//! log file
//!     → reader.rs (lazy open, one line per poll)
//!     → parser.rs (ERROR marker + `<timestamp> [<level>] <message>`)
//!     → Extracted::Record, or a single Extracted::Failure on read error
//! ```
//!
//! # Design Decisions
//! - Pull-based `Stream`: the HTTP body drives the read, giving backpressure
//! - Failures travel as data in the same stream, never as panics
//! - Non-matching lines are dropped silently

pub mod parser;
pub mod reader;
pub mod record;

pub use parser::ErrorLineParser;
pub use reader::extract;
pub use record::{ExtractFailure, Extracted, LogRecord};
