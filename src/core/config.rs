//! Configuration for trace generation
//!
//! The binary always runs with `GeneratorConfig::default()`, which reproduces
//! the fixed layout of ten files of fifty records. The builder methods exist
//! for library callers and tests.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::TraceError;

/// How store records carry their data bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorePadding {
    /// The request id in hex followed by one `0x0` field per remaining byte.
    /// Every size, including 8, produces a line.
    PerByte,
    /// Same layout for sizes 1, 2 and 4, but 8-byte stores write no line
    SkipWideStores,
}

impl Default for StorePadding {
    fn default() -> Self {
        StorePadding::PerByte
    }
}

/// Configuration for a trace generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the trace files are written into
    pub output_dir: PathBuf,
    /// File name stem; the file index is appended to it
    pub file_prefix: String,
    pub file_extension: String,
    /// Number of trace files to write
    pub file_count: usize,
    /// Records per file drawn from fresh addresses
    pub fresh_records: usize,
    /// Records per file drawn from the address pool
    pub repeat_records: usize,
    /// Largest raw address a fresh draw can produce (inclusive)
    pub max_address: u64,
    /// Largest tick value (inclusive)
    pub max_tick: u8,
    /// Seed for the random source; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub store_padding: StorePadding,
}

impl GeneratorConfig {
    /// Create a configuration with the default trace layout
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "test".to_string(),
            file_extension: "txt".to_string(),
            file_count: 10,
            fresh_records: 25,
            repeat_records: 25,
            max_address: 1 << 26,
            max_tick: 3,
            seed: None,
            store_padding: StorePadding::default(),
        }
    }

    /// Write files into `dir` instead of the working directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Use a fixed seed so runs are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    /// Set how many fresh and repeat records each file holds
    pub fn with_records(mut self, fresh: usize, repeat: usize) -> Self {
        self.fresh_records = fresh;
        self.repeat_records = repeat;
        self
    }

    pub fn with_store_padding(mut self, padding: StorePadding) -> Self {
        self.store_padding = padding;
        self
    }

    /// Records drawn for each file
    pub fn records_per_file(&self) -> usize {
        self.fresh_records + self.repeat_records
    }

    /// Path of the trace file with the given index
    pub fn file_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.file_name(index))
    }

    pub fn file_name(&self, index: usize) -> String {
        if self.file_extension.is_empty() {
            format!("{}{}", self.file_prefix, index)
        } else {
            format!("{}{}.{}", self.file_prefix, index, self.file_extension)
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check that the configuration can produce a trace
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.file_count == 0 {
            return Err(TraceError::InvalidConfig(
                "file_count must be at least 1".to_string(),
            ));
        }
        if self.fresh_records == 0 && self.repeat_records > 0 {
            return Err(TraceError::InvalidConfig(
                "repeat records need at least one fresh record per file".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
