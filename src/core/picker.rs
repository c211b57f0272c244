//! Address selection strategies.
//!
//! A trace mixes two kinds of addresses: fresh ones drawn uniformly from the
//! address space, and repeats drawn from the pool of addresses already seen.
//! Both strategies pick their own access size and return the address aligned
//! down to it.

use rand::Rng;

use super::address_pool::AddressPool;
use super::errors::TraceError;
use super::types::{AccessSize, SizedAddress};

/// Draw a fresh raw address in `[0, max_address]` and a random size.
///
/// The raw address is recorded in `pool` before alignment.
pub fn pick_fresh_address<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &mut AddressPool,
    max_address: u64,
) -> SizedAddress {
    let size = AccessSize::random(rng);
    let raw = rng.gen_range(0..=max_address);
    pool.push(raw);
    (size.align(raw), size)
}

/// Reuse a raw address from `pool` with a newly drawn size.
pub fn pick_repeat_address<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &AddressPool,
) -> Result<SizedAddress, TraceError> {
    let raw = pool.choose(rng).ok_or(TraceError::EmptyAddressPool)?;
    let size = AccessSize::random(rng);
    Ok((size.align(raw), size))
}

/// Source of `(aligned address, size)` pairs for record generation
pub trait AddressPicker {
    fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SizedAddress, TraceError>;
}

/// Picks fresh addresses and grows the pool
pub struct FreshPicker<'a> {
    pool: &'a mut AddressPool,
    max_address: u64,
}

impl<'a> FreshPicker<'a> {
    pub fn new(pool: &'a mut AddressPool, max_address: u64) -> Self {
        Self { pool, max_address }
    }
}

impl AddressPicker for FreshPicker<'_> {
    fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SizedAddress, TraceError> {
        Ok(pick_fresh_address(rng, self.pool, self.max_address))
    }
}

/// Picks addresses already present in the pool
pub struct RepeatPicker<'a> {
    pool: &'a AddressPool,
}

impl<'a> RepeatPicker<'a> {
    pub fn new(pool: &'a AddressPool) -> Self {
        Self { pool }
    }
}

impl AddressPicker for RepeatPicker<'_> {
    fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SizedAddress, TraceError> {
        pick_repeat_address(rng, self.pool)
    }
}
