use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::address_pool::AddressPool;
use super::config::GeneratorConfig;
use super::errors::TraceError;
use super::picker::{AddressPicker, FreshPicker, RepeatPicker};
use super::record::{format_record, AccessRecord};
use super::stats::TraceStats;

/// Writes a series of trace files from one random source and one address pool.
///
/// Each file holds `fresh_records` records over new addresses followed by
/// `repeat_records` records over addresses already in the pool. The pool is
/// carried from file to file, so the repeat section of file `n` can reuse
/// addresses first drawn in any file up to `n`.
pub struct TraceGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    pool: AddressPool,
    stats: TraceStats,
}

impl TraceGenerator {
    /// Create a generator, seeding from `config.seed` or from OS entropy
    pub fn new(config: GeneratorConfig) -> Result<Self, TraceError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a generator that draws from an existing random source
    pub fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self, TraceError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            pool: AddressPool::new(),
            stats: TraceStats::new(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Addresses drawn so far, across all files
    pub fn pool(&self) -> &AddressPool {
        &self.pool
    }

    pub fn stats(&self) -> &TraceStats {
        &self.stats
    }

    /// Write every configured trace file in order.
    ///
    /// Stops at the first file that cannot be written; files already
    /// written are left in place.
    pub fn run(&mut self) -> Result<TraceStats, TraceError> {
        info!(
            "Generating {} trace files in {}",
            self.config.file_count,
            self.config.output_dir().display()
        );
        for index in 0..self.config.file_count {
            self.write_file(index)?;
        }
        self.stats.pool_len = self.pool.len();
        info!("Trace generation done: {}", self.stats);
        Ok(self.stats.clone())
    }

    /// Create (or truncate) the trace file with the given index and fill it
    pub fn write_file(&mut self, index: usize) -> Result<PathBuf, TraceError> {
        let path = self.config.file_path(index);
        let file = File::create(&path).map_err(|e| TraceError::io_at(&path, e))?;
        let mut sink = BufWriter::new(file);

        let lines_before = self.stats.lines_written;
        self.generate_file(&mut sink).map_err(|e| match e {
            TraceError::Io { path: None, source } => TraceError::io_at(&path, source),
            other => other,
        })?;
        sink.flush().map_err(|e| TraceError::io_at(&path, e))?;

        self.stats.files_written += 1;
        self.stats.pool_len = self.pool.len();
        info!(
            "Wrote {} ({} lines, pool size {})",
            path.display(),
            self.stats.lines_written - lines_before,
            self.pool.len()
        );
        Ok(path)
    }

    /// Emit one file's worth of records into `sink`
    pub fn generate_file<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), TraceError> {
        let fresh = self.config.fresh_records;
        let total = self.config.records_per_file();

        let mut picker = FreshPicker::new(&mut self.pool, self.config.max_address);
        for index in 0..fresh {
            let (record, written) = Self::next_record(
                &mut self.rng,
                &self.config,
                index,
                &mut picker,
                sink,
            )?;
            self.stats.record(&record, written);
        }

        let mut picker = RepeatPicker::new(&self.pool);
        for index in fresh..total {
            let (record, written) = Self::next_record(
                &mut self.rng,
                &self.config,
                index,
                &mut picker,
                sink,
            )?;
            self.stats.record(&record, written);
        }
        Ok(())
    }

    fn next_record<P: AddressPicker, W: Write + ?Sized>(
        rng: &mut StdRng,
        config: &GeneratorConfig,
        index: usize,
        picker: &mut P,
        sink: &mut W,
    ) -> Result<(AccessRecord, bool), TraceError> {
        let (record, written) = format_record(rng, config, index as u32, picker, sink)?;
        if written {
            debug!("{}", record);
        } else {
            warn!(
                "Skipped {}-byte store at {:#x} (request {})",
                record.size,
                record.address,
                record.request_id()
            );
        }
        Ok((record, written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorePadding;

    fn parse_lines(bytes: Vec<u8>) -> Vec<Vec<String>> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn hex(field: &str) -> u64 {
        u64::from_str_radix(field.trim_start_matches("0x"), 16).unwrap()
    }

    #[test]
    fn test_generate_file_layout() {
        let config = GeneratorConfig::new().with_seed(2024);
        let mut generator = TraceGenerator::new(config).unwrap();
        let mut sink = Vec::new();
        generator.generate_file(&mut sink).unwrap();

        let lines = parse_lines(sink);
        assert_eq!(lines.len(), 50);
        assert_eq!(generator.pool().len(), 25);

        for (i, fields) in lines.iter().enumerate() {
            let tick: u8 = fields[0].parse().unwrap();
            let kind: u8 = fields[1].parse().unwrap();
            let address = hex(&fields[2]);
            let id: usize = fields[3].parse().unwrap();
            let size: u64 = fields[4].parse().unwrap();

            assert!(tick <= 3);
            assert!(kind <= 1);
            assert_eq!(id, i + 1);
            assert_eq!(address % size, 0);
            let expected = if kind == 0 { 5 } else { 5 + size as usize };
            assert_eq!(fields.len(), expected);
        }
    }

    #[test]
    fn test_repeat_section_reuses_pool() {
        let config = GeneratorConfig::new().with_seed(77);
        let mut generator = TraceGenerator::new(config).unwrap();
        let mut sink = Vec::new();
        generator.generate_file(&mut sink).unwrap();

        let pool = generator.pool().as_slice().to_vec();
        for fields in &parse_lines(sink)[25..] {
            let address = hex(&fields[2]);
            let size: u64 = fields[4].parse().unwrap();
            assert!(pool.iter().any(|raw| (raw / size) * size == address));
        }
    }

    #[test]
    fn test_pool_grows_across_files() {
        let config = GeneratorConfig::new().with_seed(3);
        let mut generator = TraceGenerator::new(config).unwrap();

        for expected in [25, 50, 75] {
            generator.generate_file(&mut std::io::sink()).unwrap();
            assert_eq!(generator.pool().len(), expected);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        TraceGenerator::new(GeneratorConfig::new().with_seed(9))
            .unwrap()
            .generate_file(&mut first)
            .unwrap();
        TraceGenerator::new(GeneratorConfig::new().with_seed(9))
            .unwrap()
            .generate_file(&mut second)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_skip_wide_stores() {
        let config = GeneratorConfig::new()
            .with_seed(5)
            .with_store_padding(StorePadding::SkipWideStores);
        let mut generator = TraceGenerator::new(config).unwrap();
        let mut sink = Vec::new();
        for _ in 0..10 {
            generator.generate_file(&mut sink).unwrap();
        }

        let stats = generator.stats();
        let lines = parse_lines(sink);
        assert!(lines.iter().all(|fields| fields.len() != 13));
        assert_eq!(lines.len(), stats.lines_written);
        assert_eq!(stats.total_records(), 500);
        assert_eq!(stats.lines_written + stats.skipped_stores, 500);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig::new().with_records(0, 1);
        assert!(matches!(
            TraceGenerator::new(config),
            Err(TraceError::InvalidConfig(_))
        ));
    }
}
