use crate::options::ScanLimits;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a file is treated in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Source, markup or config; content is included verbatim.
    Text,
    /// Common asset formats (images, fonts, archives, PDF).
    SafeBinary,
    /// Executables, shared libraries, bytecode and native modules.
    SuspiciousBinary,
    /// Anything else that failed the UTF-8 probe.
    UnknownBinary,
}

impl Category {
    /// The label used in reports, e.g. `suspicious-binary`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::SafeBinary => "safe-binary",
            Category::SuspiciousBinary => "suspicious-binary",
            Category::UnknownBinary => "unknown-binary",
        }
    }

    /// Inventory glyph for this category.
    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Text => "📄",
            Category::SafeBinary => "🖼️",
            Category::SuspiciousBinary => "⚠️",
            Category::UnknownBinary => "❓",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the report shows for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum FileContent {
    /// The file's data, read as UTF-8. May be empty.
    Text(String),
    /// A marker produced by the collector instead of file data,
    /// like `[BINARY FILE - TYPE UNKNOWN]`.
    Placeholder(String),
}

impl FileContent {
    pub fn as_str(&self) -> &str {
        match self {
            FileContent::Text(s) | FileContent::Placeholder(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, FileContent::Placeholder(_))
    }
}

// File names come from the scanned tree and need not be UTF-8.
fn path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// A single file found under the scan root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the scan root.
    #[serde(serialize_with = "path_lossy")]
    pub path: PathBuf,
    /// Path as walked (root joined with `path`).
    #[serde(serialize_with = "path_lossy")]
    pub absolute_path: PathBuf,
    /// On-disk size in bytes, even when the content was not read.
    pub size: u64,
    pub category: Category,
    /// `None` only if nothing was ever populated for this entry.
    pub content: Option<FileContent>,
}

/// Everything one scan produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// The directory that was scanned.
    #[serde(serialize_with = "path_lossy")]
    pub root: PathBuf,
    /// The remote repository the root was cloned from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Files in traversal order.
    pub files: Vec<FileEntry>,
    /// Human-readable notes about everything skipped or suspicious.
    pub warnings: Vec<String>,
    /// Bytes of text content actually read.
    pub total_size: u64,
    /// Files counted against the file cap.
    pub file_count: usize,
    /// Limits the scan ran under.
    pub limits: ScanLimits,
}

impl ScanResult {
    pub(crate) fn empty(root: PathBuf, limits: ScanLimits, source_url: Option<String>) -> Self {
        Self {
            root,
            source_url,
            files: Vec::new(),
            warnings: Vec::new(),
            total_size: 0,
            file_count: 0,
            limits,
        }
    }
}
