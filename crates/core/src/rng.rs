//! Seeded random helpers built on `ChaCha8Rng::next_u64`.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub type SimRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform integer in `min..=max`.
pub fn range_u32(rng: &mut SimRng, min: u32, max: u32) -> u32 {
    debug_assert!(min <= max);
    let span = u64::from(max - min) + 1;
    min + (rng.next_u64() % span) as u32
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn index(rng: &mut SimRng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

pub fn chance(rng: &mut SimRng, probability: f64) -> bool {
    let roll = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    roll < probability
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut SimRng, items: &mut [T]) {
    for upper in (1..items.len()).rev() {
        let pick = index(rng, upper + 1);
        items.swap(upper, pick);
    }
}

pub fn pick<'a, T>(rng: &mut SimRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(index(rng, items.len()))
}
