use rand::Rng;
use serde::{Deserialize, Serialize};

/// Byte width of a simulated memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessSize {
    Byte,
    Half,
    Word,
    Double,
}

impl AccessSize {
    /// All access sizes, narrowest first
    pub const ALL: [AccessSize; 4] = [
        AccessSize::Byte,
        AccessSize::Half,
        AccessSize::Word,
        AccessSize::Double,
    ];

    /// Number of bytes covered by the access
    pub fn bytes(self) -> u64 {
        match self {
            AccessSize::Byte => 1,
            AccessSize::Half => 2,
            AccessSize::Word => 4,
            AccessSize::Double => 8,
        }
    }

    /// Look up the size for a byte count, if it is one of {1, 2, 4, 8}
    pub fn from_bytes(bytes: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.bytes() == bytes)
    }

    /// Draw a size uniformly from {1, 2, 4, 8}
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Round `address` down to a multiple of this size
    pub fn align(self, address: u64) -> u64 {
        (address / self.bytes()) * self.bytes()
    }

    /// Index into per-size counter arrays
    pub(crate) fn index(self) -> usize {
        match self {
            AccessSize::Byte => 0,
            AccessSize::Half => 1,
            AccessSize::Word => 2,
            AccessSize::Double => 3,
        }
    }
}

impl std::fmt::Display for AccessSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Whether a record reads or writes memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    Load,
    Store,
}

impl AccessKind {
    /// Draw load or store with equal probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_flag(rng.gen_range(0..=1))
    }

    /// Map the on-disk flag (0 = load, anything else = store)
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            AccessKind::Load
        } else {
            AccessKind::Store
        }
    }

    /// The flag written to the trace file
    pub fn flag(self) -> u8 {
        match self {
            AccessKind::Load => 0,
            AccessKind::Store => 1,
        }
    }

    pub fn is_store(self) -> bool {
        self == AccessKind::Store
    }
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag())
    }
}

/// Small timestamp tag attached to each record
pub type Tick = u8;

/// An address paired with the size it was aligned to
pub type SizedAddress = (u64, AccessSize);
