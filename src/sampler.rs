use crate::error::{GameError, Result};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Draw `k` distinct elements from `pool` uniformly at random, without
/// replacement. The order of the result is unspecified.
pub fn sample<T: Clone>(pool: &[T], k: usize) -> Result<Vec<T>> {
    sample_with(&mut rand::rng(), pool, k)
}

/// Same as [`sample`] but with a caller-supplied RNG, so selection can be
/// made deterministic with a seeded generator.
pub fn sample_with<T: Clone, R: Rng + ?Sized>(rng: &mut R, pool: &[T], k: usize) -> Result<Vec<T>> {
    if k > pool.len() {
        return Err(GameError::InvalidArgument {
            requested: k,
            available: pool.len(),
        });
    }
    Ok(pool.choose_multiple(rng, k).cloned().collect())
}
