use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::distance::round_distance;
use crate::models::{MatchCandidate, Provider};

/// Price bands handed out when a record carries none
pub const PRICE_BANDS: &[&str] = &["€20-35/h", "€30-45/h", "€40-60/h", "€50-80/h"];

/// Lower (inclusive) and upper (exclusive) bounds of a synthetic rating
pub const RATING_RANGE: std::ops::Range<f64> = 4.2..4.8;

/// Lower (inclusive) and upper (exclusive) bounds of a synthetic review count
pub const REVIEW_COUNT_RANGE: std::ops::Range<u32> = 50..250;

/// Turns ranked providers into presented match candidates
///
/// Identity fields and any field the raw record supplied are kept as-is.
/// Rating, review count and price band are synthesised only when missing;
/// those values are display-only and intentionally not reproducible unless
/// the assembler is seeded.
pub struct ResultAssembler {
    rng: Mutex<StdRng>,
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Assembler with a fixed seed, for reproducible display fields
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Build the presented candidate for one provider
    pub fn assemble(&self, mut provider: Provider, distance_km: f64) -> MatchCandidate {
        // The computed distance supersedes whatever the registry sent
        provider.extra.remove("distance");

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let rating = provider
            .rating
            .take()
            .unwrap_or_else(|| rng.random_range(RATING_RANGE));
        let review_count = provider
            .review_count
            .take()
            .unwrap_or_else(|| rng.random_range(REVIEW_COUNT_RANGE));
        let price_range = provider
            .price_range
            .take()
            .unwrap_or_else(|| PRICE_BANDS[rng.random_range(0..PRICE_BANDS.len())].to_string());

        MatchCandidate {
            provider,
            distance: round_distance(distance_km),
            rating,
            review_count,
            price_range,
        }
    }

    /// Assemble an already ranked list, keeping its order
    pub fn assemble_all(&self, ranked: Vec<(Provider, f64)>) -> Vec<MatchCandidate> {
        ranked
            .into_iter()
            .map(|(provider, distance_km)| self.assemble(provider, distance_km))
            .collect()
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}
