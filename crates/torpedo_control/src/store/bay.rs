//! TorpedoBay — конкретный store с конечным запасом и шансом misfire.
//!
//! Misfire моделирует перегрев пусковой установки: выстрел не происходит,
//! торпеда остаётся в bay. RNG seeded (ChaCha8) — прогоны детерминистичны.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::TorpedoStore;

/// Torpedo bay (один из двух stores корабля)
#[derive(Debug, Clone)]
pub struct TorpedoBay {
    /// Оставшиеся торпеды
    torpedo_count: u32,

    /// Вероятность misfire [0.0, 1.0]
    failure_rate: f64,

    rng: ChaCha8Rng,
}

impl TorpedoBay {
    /// Bay без misfire (failure_rate = 0.0)
    pub fn new(torpedo_count: u32, seed: u64) -> Self {
        Self::with_failure_rate(torpedo_count, 0.0, seed)
    }

    /// Bay с заданным шансом misfire (clamp в [0.0, 1.0], NaN → 0.0)
    pub fn with_failure_rate(torpedo_count: u32, failure_rate: f64, seed: u64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };

        Self {
            torpedo_count,
            failure_rate,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn torpedo_count(&self) -> u32 {
        self.torpedo_count
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl TorpedoStore for TorpedoBay {
    fn is_empty(&self) -> bool {
        self.torpedo_count == 0
    }

    fn fire(&mut self, count: u32) -> bool {
        if count < 1 || count > self.torpedo_count {
            crate::logger::log_warning(&format!(
                "TorpedoBay: rejected fire request for {} torpedo(s), {} left",
                count, self.torpedo_count
            ));
            return false;
        }

        let roll: f64 = self.rng.gen();
        if roll < self.failure_rate {
            crate::logger::log_warning(&format!(
                "TorpedoBay: launcher overheated (roll {:.3} < rate {:.3}), {} torpedo(s) kept",
                roll, self.failure_rate, count
            ));
            return false;
        }

        self.torpedo_count -= count;
        true
    }
}
