use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::config::{GeneratorConfig, StorePadding};
use super::errors::TraceError;
use super::picker::AddressPicker;
use super::types::{AccessKind, AccessSize, Tick};

/// One memory access of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub tick: Tick,
    pub kind: AccessKind,
    /// Address aligned to `size`
    pub address: u64,
    /// Zero-based position of the record within its file
    pub sequence_index: u32,
    pub size: AccessSize,
}

impl AccessRecord {
    /// Request id written to the trace, one-based
    pub fn request_id(&self) -> u64 {
        u64::from(self.sequence_index) + 1
    }

    /// Number of whitespace-separated fields in the line for this record
    pub fn field_count(&self) -> usize {
        match self.kind {
            AccessKind::Load => 5,
            AccessKind::Store => 5 + self.size.bytes() as usize,
        }
    }

    /// Whether `padding` writes a line for this record
    pub fn is_written(&self, padding: StorePadding) -> bool {
        !(padding == StorePadding::SkipWideStores
            && self.kind.is_store()
            && self.size == AccessSize::Double)
    }

    /// Write the record as one newline-terminated line.
    ///
    /// Returns `false` when `padding` drops the record.
    pub fn write_line<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        padding: StorePadding,
    ) -> std::io::Result<bool> {
        if !self.is_written(padding) {
            return Ok(false);
        }
        writeln!(sink, "{}", self)?;
        Ok(true)
    }
}

/// Load: `tick 0 addr id size`.
/// Store: `tick 1 addr id size hex(id)` then `size - 1` zero fields.
impl std::fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = self.request_id();
        write!(
            f,
            "{} {} {:#x} {} {}",
            self.tick, self.kind, self.address, id, self.size
        )?;
        if self.kind.is_store() {
            write!(f, " {:#x}", id)?;
            for _ in 1..self.size.bytes() {
                write!(f, " {:#x}", 0)?;
            }
        }
        Ok(())
    }
}

/// Draw one record and write it to `sink`.
///
/// The picker is consulted first, then the tick and the access kind are
/// drawn. The record is returned with a flag telling whether a line was
/// actually written.
pub fn format_record<R, P, W>(
    rng: &mut R,
    config: &GeneratorConfig,
    sequence_index: u32,
    picker: &mut P,
    sink: &mut W,
) -> Result<(AccessRecord, bool), TraceError>
where
    R: Rng + ?Sized,
    P: AddressPicker,
    W: Write + ?Sized,
{
    let (address, size) = picker.pick(rng)?;
    let tick = rng.gen_range(0..=config.max_tick);
    let kind = AccessKind::random(rng);

    let record = AccessRecord {
        tick,
        kind,
        address,
        sequence_index,
        size,
    };
    let written = record.write_line(sink, config.store_padding)?;
    Ok((record, written))
}
