//! Extension-based file classification with a UTF-8 probe fallback.

use crate::types::Category;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when the extension is not recognised.
pub const PROBE_LEN: u64 = 1024;

/// Extensions whose content is read into the report.
pub static TEXT_EXTENSIONS: &[&str] = &[
    "md", "txt", "py", "sh", "bash", "js", "ts", "json", "yaml", "yml", "html", "css", "xml",
    "toml", "ini", "cfg", "conf", "sql", "r", "jsx", "tsx", "vue", "svelte", "php", "rb", "pl",
    "lua", "go", "rs", "java", "kt", "scala", "c", "cpp", "h", "hpp", "cs", "swift", "m",
];

/// Asset formats that are listed but not inspected.
pub static SAFE_BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "bmp", "ttf", "otf", "woff", "woff2", "eot",
    "pdf", "zip", "tar", "gz", "bz2", "7z",
];

/// Executable or compiled formats that need a human to look at them.
pub static SUSPICIOUS_BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "dat", "pyc", "pyo", "class", "jar", "war", "wasm", "node",
];

/// Looks up an extension (without the leading dot, any case) in the fixed sets.
pub fn category_for_extension(ext: &str) -> Option<Category> {
    let ext = ext.to_ascii_lowercase();
    let ext = ext.as_str();
    if TEXT_EXTENSIONS.contains(&ext) {
        Some(Category::Text)
    } else if SAFE_BINARY_EXTENSIONS.contains(&ext) {
        Some(Category::SafeBinary)
    } else if SUSPICIOUS_BINARY_EXTENSIONS.contains(&ext) {
        Some(Category::SuspiciousBinary)
    } else {
        None
    }
}

/// Classifies a file by extension, falling back to [`probe_utf8`].
pub fn classify(path: &Path) -> Category {
    let by_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(category_for_extension);
    match by_ext {
        Some(category) => category,
        None if probe_utf8(path) => Category::Text,
        None => Category::UnknownBinary,
    }
}

/// Returns true if the first [`PROBE_LEN`] bytes of the file decode as UTF-8.
///
/// A multi-byte character cut off by the probe boundary is not an error.
/// Any I/O failure counts as "not text".
pub fn probe_utf8(path: &Path) -> bool {
    let mut prefix = Vec::with_capacity(PROBE_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(PROBE_LEN).read_to_end(&mut prefix));
    if read.is_err() {
        return false;
    }
    match std::str::from_utf8(&prefix) {
        Ok(_) => true,
        // error_len() is None only when the input ends mid-sequence
        Err(e) => e.error_len().is_none() && prefix.len() as u64 == PROBE_LEN,
    }
}
