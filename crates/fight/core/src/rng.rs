//! Deterministic random number generation for fights.
//!
//! All randomness in a fight is drawn from a [`FightRng`] built from the fight
//! seed. Each draw mixes the seed with a monotonically increasing nonce, so a
//! fight is a pure function of (records, tables, seed) and any server or client
//! that re-simulates it obtains the same step log.

use sha2::{Digest, Sha256};

use crate::stats::Rate;

/// Stateless source of fight randomness: the same seed always yields the
/// same value.
pub trait RngOracle: Send + Sync {
    /// Raw 32-bit draw for `seed`.
    fn next_u32(&self, seed: u64) -> u32;

    /// Draw in `0..Rate::SCALE`, compared against per-mille rates.
    fn roll_per_mille(&self, seed: u64) -> u32 {
        self.next_u32(seed) % Rate::SCALE
    }

    /// Draw in `min..=max`; a degenerate range yields `min`.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG-XSH-RR over a single LCG advance of the mixed seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn advance(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn permute(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::permute(Self::advance(seed))
    }
}

/// Mix the fight seed with the draw nonce and the fighter the draw is made for.
pub fn compute_seed(fight_seed: u64, nonce: u64, actor: u32) -> u64 {
    let mut hash = fight_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Derive a fight seed from a persistent fight identifier.
///
/// Uses the first eight bytes of the SHA-256 digest, little endian, so the
/// same identifier always maps to the same seed.
pub fn seed_from_fight_id(fight_id: &str) -> u64 {
    let digest = Sha256::digest(fight_id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Stateful random stream for one fight.
///
/// Wraps an [`RngOracle`] with the fight seed and a draw counter. The stream is
/// the only source of entropy the simulator is allowed to touch.
#[derive(Clone, Debug)]
pub struct FightRng<R = PcgRng> {
    oracle: R,
    seed: u64,
    nonce: u64,
}

impl FightRng<PcgRng> {
    /// Create a PCG-backed stream for the given fight seed.
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(PcgRng, seed)
    }
}

impl<R: RngOracle> FightRng<R> {
    pub fn with_oracle(oracle: R, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
        }
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, actor: u32) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, actor);
        self.nonce += 1;
        seed
    }

    /// Succeeds with probability `rate` (per-mille).
    pub fn chance(&mut self, actor: u32, rate: Rate) -> bool {
        if rate.is_zero() {
            // Zero rates never consume a draw.
            return false;
        }
        let seed = self.next_seed(actor);
        self.oracle.roll_per_mille(seed) < rate.get()
    }

    /// Uniform value in `[min, max]` inclusive.
    pub fn range(&mut self, actor: u32, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(actor);
        self.oracle.range(seed, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = FightRng::new(42);
        let mut b = FightRng::new(42);

        let rolls_a: Vec<u32> = (0..32).map(|i| a.range(i % 2, 0, 1000)).collect();
        let rolls_b: Vec<u32> = (0..32).map(|i| b.range(i % 2, 0, 1000)).collect();

        assert_eq!(rolls_a, rolls_b);
        assert_eq!(a.draws(), 32);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = FightRng::new(1);
        let mut b = FightRng::new(2);

        let rolls_a: Vec<u32> = (0..16).map(|_| a.range(0, 0, u32::MAX - 1)).collect();
        let rolls_b: Vec<u32> = (0..16).map(|_| b.range(0, 0, u32::MAX - 1)).collect();

        assert_ne!(rolls_a, rolls_b);
    }

    #[test]
    fn zero_rate_never_draws() {
        let mut rng = FightRng::new(7);
        assert!(!rng.chance(0, Rate::ZERO));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn certain_rate_always_succeeds() {
        let mut rng = FightRng::new(7);
        assert!((0..100).all(|_| rng.chance(1, Rate::CERTAIN)));
    }

    #[test]
    fn range_stays_inside_bounds() {
        let mut rng = FightRng::new(99);
        for _ in 0..200 {
            let value = rng.range(0, 80, 120);
            assert!((80..=120).contains(&value));
        }
        assert_eq!(rng.range(0, 5, 5), 5);
    }

    #[test]
    fn full_width_range_does_not_overflow() {
        let mut rng = FightRng::new(3);
        let _ = rng.range(0, 0, u32::MAX);
        assert_eq!(rng.range(1, u32::MAX, u32::MAX), u32::MAX);
        assert!(PcgRng.range(11, u32::MAX - 1, u32::MAX) >= u32::MAX - 1);
    }

    #[test]
    fn fight_id_seed_is_stable() {
        assert_eq!(seed_from_fight_id("fight-1"), seed_from_fight_id("fight-1"));
        assert_ne!(seed_from_fight_id("fight-1"), seed_from_fight_id("fight-2"));
    }
}
