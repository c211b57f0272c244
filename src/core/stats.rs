use super::record::AccessRecord;
use super::types::AccessSize;

/// Counters collected over a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of trace files written
    pub files_written: usize,
    /// Number of lines written across all files
    pub lines_written: usize,
    pub loads: usize,
    pub stores: usize,
    /// Stores drawn but dropped by the padding policy
    pub skipped_stores: usize,
    /// Accesses per size, indexed 1, 2, 4, 8 bytes
    pub accesses_by_size: [usize; 4],
    /// Length of the address pool at the end of the run
    pub pool_len: usize,
}

impl TraceStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one drawn record
    pub fn record(&mut self, record: &AccessRecord, written: bool) {
        if record.kind.is_store() {
            self.stores += 1;
        } else {
            self.loads += 1;
        }
        self.accesses_by_size[record.size.index()] += 1;
        if written {
            self.lines_written += 1;
        } else {
            self.skipped_stores += 1;
        }
    }

    /// Accesses drawn with the given size
    pub fn accesses_of(&self, size: AccessSize) -> usize {
        self.accesses_by_size[size.index()]
    }

    /// Records drawn, whether written or skipped
    pub fn total_records(&self) -> usize {
        self.loads + self.stores
    }
}

impl std::fmt::Display for TraceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files, {} lines ({} loads, {} stores, {} skipped), sizes 1/2/4/8: {}/{}/{}/{}, pool {}",
            self.files_written,
            self.lines_written,
            self.loads,
            self.stores,
            self.skipped_stores,
            self.accesses_by_size[0],
            self.accesses_by_size[1],
            self.accesses_by_size[2],
            self.accesses_by_size[3],
            self.pool_len,
        )
    }
}
