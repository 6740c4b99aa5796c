//! # Skillgather
//!
//! `skillgather` collects every file of an agent skill folder into a single report meant for
//! security review, by a human or by a model. Files are classified by extension (with a UTF-8
//! probe as fallback), text is inlined between untrusted-content markers, binaries are replaced
//! by placeholders, and anything skipped or suspicious is listed as a warning.
//!
//! The walk is bounded: at most [`MAX_FILES`] files are counted, text files above
//! [`MAX_FILE_SIZE`] are not read, and no more than [`MAX_TOTAL_SIZE`] bytes of text are read in
//! total. Hidden entries are ignored, symbolic links are never followed, and every file must
//! resolve to a location inside the root.
//!
//! # Features
//!
//! - `logging` (default): emits debug events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use skillgather::{GatherBuilder, format_report, gather};
//!
//! let options = GatherBuilder::new("./my-skill").build();
//! let result = gather(options);
//!
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{}", format_report(&result));
//! ```

mod classify;
mod engine;
mod error;
mod options;
pub mod output;
pub mod remote;
mod types;

pub use classify::{
    PROBE_LEN, SAFE_BINARY_EXTENSIONS, SUSPICIOUS_BINARY_EXTENSIONS, TEXT_EXTENSIONS,
    category_for_extension, classify, probe_utf8,
};
pub use engine::{SKILL_MARKER, gather};
pub use error::GatherError;
pub use options::{GatherBuilder, GatherOptions, MAX_FILE_SIZE, MAX_FILES, MAX_TOTAL_SIZE, ScanLimits};
pub use output::{OutputFormat, format_report};
pub use remote::{ClonedRepo, GitCloner, is_remote_url};
pub use types::{Category, FileContent, FileEntry, ScanResult};
