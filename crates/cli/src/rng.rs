//! `MirrorRng` backed by `rand`'s `StdRng`, seeded from `--seed`,
//! `SEQ_RNG_SEED`, or OS entropy, in that order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seq2d_core::MirrorRng;

pub struct StdMirrorRng(StdRng);

impl StdMirrorRng {
    pub fn from_seed_arg(seed: Option<u64>) -> Self {
        let seed = seed.or_else(|| {
            std::env::var("SEQ_RNG_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
        });
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self(rng)
    }
}

impl MirrorRng for StdMirrorRng {
    fn pick_mirror(&mut self) -> u8 {
        self.0.gen_range(0..4)
    }
}
