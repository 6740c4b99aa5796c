use crate::classify::classify;
use crate::options::{GatherOptions, ScanLimits};
use crate::output::group_digits;
use crate::types::{Category, FileContent, FileEntry, ScanResult};
use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File whose presence directly under the root marks a skill folder.
pub const SKILL_MARKER: &str = "SKILL.md";

struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(root: &Path) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| !is_dot_name(entry.file_name()))
            .sort_by_file_path(files_before_dirs);
        Self {
            inner: builder.build(),
        }
    }
}
impl IntoIterator for Walker {
    type Item = Result<ignore::DirEntry, ignore::Error>;
    type IntoIter = ignore::Walk;
    fn into_iter(self) -> Self::IntoIter {
        self.inner
    }
}

fn is_dot_name(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

// Within one directory: plain files first, then subdirectories, each by name.
fn files_before_dirs(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

/// Returns whether `path` canonicalizes to somewhere under `root_resolved`.
///
/// `root_resolved` must already be canonical.
pub(crate) fn is_contained(root_resolved: &Path, path: &Path) -> io::Result<bool> {
    let resolved = fs::canonicalize(path)?;
    Ok(resolved.starts_with(root_resolved))
}

struct Collector<'a> {
    root: &'a Path,
    root_resolved: PathBuf,
    limits: ScanLimits,
    result: ScanResult,
}

impl Collector<'_> {
    fn warn(&mut self, message: String) {
        #[cfg(feature = "logging")]
        tracing::debug!("scan warning: {}", message);
        self.result.warnings.push(message);
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root).unwrap_or(path).to_path_buf()
    }

    /// Walks the tree. Stops early once the file cap is exceeded.
    fn walk(&mut self) {
        for item in Walker::new(self.root) {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    self.warn(format!("Could not read directory entry: {}", e));
                    continue;
                }
            };
            if entry.depth() == 0 {
                self.note_symlinked_dirs(self.root);
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                self.note_symlinked_dirs(path);
                continue;
            }
            // already reported when the parent was entered
            if file_type.is_symlink() && fs::metadata(path).is_ok_and(|m| m.is_dir()) {
                continue;
            }
            let rel = self.relative(path);

            self.result.file_count += 1;
            if self.result.file_count > self.limits.max_files {
                self.result.file_count = self.limits.max_files;
                self.warn(format!(
                    "File limit exceeded ({}). Stopping enumeration.",
                    self.limits.max_files
                ));
                return;
            }

            if file_type.is_symlink() {
                self.warn(format!("Skipping symlink: {}", rel.display()));
                continue;
            }
            self.process_file(path, rel);
        }
    }

    /// Warns about symlinked subdirectories of `dir` as the walk enters it,
    /// ahead of any of its files.
    fn note_symlinked_dirs(&mut self, dir: &Path) {
        let Ok(read_dir) = fs::read_dir(dir) else {
            return;
        };
        let mut linked: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .filter(|child| !is_dot_name(&child.file_name()))
            .filter(|child| child.file_type().is_ok_and(|t| t.is_symlink()))
            .map(|child| child.path())
            .filter(|path| fs::metadata(path).is_ok_and(|m| m.is_dir()))
            .collect();
        linked.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        for path in linked {
            let rel = self.relative(&path);
            self.warn(format!("Skipping symlinked directory: {}", rel.display()));
        }
    }

    fn process_file(&mut self, path: &Path, rel: PathBuf) {
        match is_contained(&self.root_resolved, path) {
            Ok(true) => {}
            Ok(false) => {
                self.warn(format!("Path escape attempt blocked: {}", rel.display()));
                return;
            }
            Err(e) => {
                self.warn(format!("Could not resolve {}: {}", rel.display(), e));
                return;
            }
        }

        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                self.warn(format!("Could not stat {}: {}", rel.display(), e));
                return;
            }
        };
        // FIFOs and sockets would block or fail on read
        if !metadata.is_file() {
            self.warn(format!("Skipping special file: {}", rel.display()));
            return;
        }
        let size = metadata.len();
        let category = classify(path);
        #[cfg(feature = "logging")]
        tracing::debug!("{} ({} bytes) classified as {}", rel.display(), size, category);

        let content = match category {
            Category::Text => self.text_content(path, &rel, size),
            Category::SuspiciousBinary => {
                self.warn(format!("Suspicious binary file: {}", rel.display()));
                FileContent::Placeholder("[BINARY FILE - REQUIRES MANUAL INSPECTION]".to_string())
            }
            Category::UnknownBinary => {
                self.warn(format!("Unknown binary file: {}", rel.display()));
                FileContent::Placeholder("[BINARY FILE - TYPE UNKNOWN]".to_string())
            }
            Category::SafeBinary => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                FileContent::Placeholder(format!("[BINARY ASSET: .{}]", ext))
            }
        };

        self.result.files.push(FileEntry {
            path: rel,
            absolute_path: path.to_path_buf(),
            size,
            category,
            content: Some(content),
        });
    }

    fn text_content(&mut self, path: &Path, rel: &Path, size: u64) -> FileContent {
        if size > self.limits.max_file_size {
            self.warn(format!(
                "File exceeds size limit: {} ({} bytes)",
                rel.display(),
                group_digits(size)
            ));
            return FileContent::Placeholder(format!(
                "[FILE TOO LARGE: {} bytes, limit is {}]",
                group_digits(size),
                group_digits(self.limits.max_file_size)
            ));
        }
        if self.result.total_size + size > self.limits.max_total_size {
            self.warn(format!(
                "Total size limit reached, skipping: {}",
                rel.display()
            ));
            return FileContent::Placeholder(format!(
                "[SKIPPED: Total size limit ({} bytes) would be exceeded]",
                group_digits(self.limits.max_total_size)
            ));
        }
        match fs::read_to_string(path) {
            Ok(text) => {
                self.result.total_size += size;
                FileContent::Text(text)
            }
            Err(e) => {
                self.warn(format!("Could not read {}: {}", rel.display(), e));
                FileContent::Placeholder(format!("[Error reading file: {}]", e))
            }
        }
    }
}

/// Collects every file under `options.root` into a [`ScanResult`].
///
/// Never fails: a missing root, unreadable files and exceeded limits all end
/// up as entries in [`ScanResult::warnings`].
pub fn gather(options: GatherOptions) -> ScanResult {
    let GatherOptions {
        root,
        limits,
        source_url,
    } = options;
    #[cfg(feature = "logging")]
    tracing::debug!("Starting gather with root: {}", root.display());
    let mut result = ScanResult::empty(root.clone(), limits, source_url);

    if !root.exists() {
        result
            .warnings
            .push(format!("Path does not exist: {}", root.display()));
        return result;
    }
    if !root.is_dir() {
        result
            .warnings
            .push(format!("Path is not a directory: {}", root.display()));
        return result;
    }
    let root_resolved = match fs::canonicalize(&root) {
        Ok(p) => p,
        Err(e) => {
            result
                .warnings
                .push(format!("Could not resolve {}: {}", root.display(), e));
            return result;
        }
    };

    if !root.join(SKILL_MARKER).is_file() {
        result
            .warnings
            .push(format!("{} not found - may not be a valid skill", SKILL_MARKER));
    }

    let mut collector = Collector {
        root: &root,
        root_resolved,
        limits,
        result,
    };
    collector.walk();
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Gathered {} files ({} bytes read, {} warnings)",
        collector.result.files.len(),
        collector.result.total_size,
        collector.result.warnings.len()
    );
    collector.result
}
