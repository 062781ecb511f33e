use rand::seq::index;
use rand::Rng;

use crate::errors::VqError;

/// Draws `how_many` distinct indices out of `0..population`, uniformly and
/// in random order.
pub fn random_samples<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    how_many: usize,
) -> Result<Vec<usize>, VqError> {
    if how_many > population {
        return Err(VqError::SampleTooLarge {
            requested: how_many,
            population,
        });
    }
    Ok(index::sample(rng, population, how_many).into_vec())
}
