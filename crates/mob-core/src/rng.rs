//! Seeded random streams for the `random` seed priority and the graph generators.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Seeded random stream.
///
/// Each matching worker owns one handle seeded from
/// [`derive_layer_seed`], so the draws a layer sees depend only on the master
/// seed, the round and the layer, never on which thread runs it.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Stream seeded directly with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream of the worker matching `layer` in `round`.
    pub fn for_layer(master_seed: u64, round: u64, layer: u64) -> Self {
        Self::from_seed(derive_layer_seed(master_seed, round, layer))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// SipHash-1-3 (zero keys) of `(master_seed, round, layer)`.
pub fn derive_layer_seed(master_seed: u64, round: u64, layer: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    for word in [master_seed, round, layer] {
        hasher.write_u64(word);
    }
    hasher.finish()
}
