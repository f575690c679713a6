use rand::Rng;
use rand::seq::index;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Cannot sample {requested} cell(s) from a population of {available}")]
    SampleTooLarge { requested: u64, available: u64 },
    #[error("Cannot draw from an empty range")]
    EmptyRange,
}

/// Draws `sample_size` distinct column indices from `0..population`, without replacement.
///
/// Indices are returned in ascending order, so the sampled dataset reads like a subset
/// of the full expression matrix. Memory use depends on `sample_size` only.
#[instrument(level = "trace", skip_all, fields(population, sample_size))]
pub fn sample_cell_indices(
    population: u64,
    sample_size: usize,
    rng: &mut impl Rng,
) -> Result<Vec<u64>, SamplingError> {
    let too_large = || SamplingError::SampleTooLarge {
        requested: sample_size as u64,
        available: population,
    };
    if sample_size as u64 > population {
        return Err(too_large());
    }
    let length = usize::try_from(population).map_err(|_| too_large())?;

    let mut picked: Vec<u64> = index::sample(rng, length, sample_size)
        .into_iter()
        .map(|i| i as u64)
        .collect();
    picked.sort_unstable();
    Ok(picked)
}

/// Draws `count` time indices uniformly from `0..n_points`, with replacement.
pub fn sample_time_indices(
    n_points: usize,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, SamplingError> {
    if n_points == 0 {
        return Err(SamplingError::EmptyRange);
    }
    Ok((0..count).map(|_| rng.gen_range(0..n_points)).collect())
}
