use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of files counted before enumeration stops.
pub const MAX_FILES: usize = 1_000;

/// Maximum size of a single text file whose content is read (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum cumulative text content read per scan (100 MiB).
pub const MAX_TOTAL_SIZE: u64 = 100 * 1024 * 1024;

const _: () = {
    assert!(MAX_FILES > 0);
    assert!(MAX_FILE_SIZE > 0);
    assert!(MAX_TOTAL_SIZE >= MAX_FILE_SIZE);
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLimits {
    pub max_files: usize,
    pub max_file_size: u64,
    pub max_total_size: u64,
}
impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            max_file_size: MAX_FILE_SIZE,
            max_total_size: MAX_TOTAL_SIZE,
        }
    }
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherOptions {
    pub root: PathBuf,
    pub limits: ScanLimits,
    pub source_url: Option<String>,
}
impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            limits: ScanLimits::default(),
            source_url: None,
        }
    }
}
#[derive(Debug, Default)]
pub struct GatherBuilder {
    options: GatherOptions,
}
impl GatherBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: GatherOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn max_files(mut self, max: usize) -> Self {
        self.options.limits.max_files = max;
        self
    }
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.options.limits.max_file_size = bytes;
        self
    }
    pub fn max_total_size(mut self, bytes: u64) -> Self {
        self.options.limits.max_total_size = bytes;
        self
    }
    pub fn limits(mut self, limits: ScanLimits) -> Self {
        self.options.limits = limits;
        self
    }
    pub fn source_url(mut self, url: Option<String>) -> Self {
        self.options.source_url = url;
        self
    }
    pub fn build(self) -> GatherOptions {
        self.options
    }
}
