use rand::seq::SliceRandom;
use rand::Rng;

/// Grow-only record of every raw address drawn by the fresh picker.
///
/// Insertion order is generation order. The pool is shared across all
/// output files of a run and is never pruned, so later files can reuse
/// addresses first touched by earlier ones.
#[derive(Debug, Clone, Default)]
pub struct AddressPool {
    addresses: Vec<u64>,
}

impl AddressPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            addresses: Vec::new(),
        }
    }

    /// Append a raw (unaligned) address
    pub fn push(&mut self, address: u64) {
        self.addresses.push(address);
    }

    /// Pick a previously seen raw address uniformly, or `None` if empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u64> {
        self.addresses.choose(rng).copied()
    }

    pub fn contains(&self, address: u64) -> bool {
        self.addresses.contains(&address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Addresses in generation order
    pub fn as_slice(&self) -> &[u64] {
        &self.addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_pool() {
        let pool = AddressPool::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pool.is_empty());
        assert_eq!(pool.choose(&mut rng), None);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut pool = AddressPool::new();
        pool.push(30);
        pool.push(10);
        pool.push(30);
        assert_eq!(pool.as_slice(), &[30, 10, 30]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_choose_returns_member() {
        let mut pool = AddressPool::new();
        for addr in [0x10, 0x2000, 0x3fff_fff] {
            pool.push(addr);
        }
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let addr = pool.choose(&mut rng).unwrap();
            assert!(pool.contains(addr));
        }
        assert_eq!(pool.len(), 3);
    }
}
