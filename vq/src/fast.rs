use matrix::{Element, FlexMatrix};
use rand::Rng;

use crate::check_inputs;
use crate::codebook::Codebook;
use crate::errors::VqError;
use crate::helpers::get_progress_bar;
use crate::params::Params;
use crate::refine::refine;
use crate::sampler::random_samples;

/// Plain Lloyd / k-means: the dictionary starts as `dict_size` distinct
/// rows drawn at random and is refined once, with no growth steps.
///
/// Faster than [`crate::generate_dict`] but more dependent on the draw.
pub fn generate_dict_fast<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    dict_size: usize,
    params: &Params,
) -> Result<Codebook<T, W>, VqError> {
    let mut rng = params.rng();
    generate_dict_fast_with_rng(data, dict_size, params, &mut rng)
}

pub fn generate_dict_fast_with_rng<T: Element, const W: usize, R: Rng + ?Sized>(
    data: &FlexMatrix<T, W>,
    dict_size: usize,
    params: &Params,
    rng: &mut R,
) -> Result<Codebook<T, W>, VqError> {
    check_inputs(data, dict_size, params)?;

    let mut dict: FlexMatrix<T, W> = random_samples(rng, data.len(), dict_size)?
        .into_iter()
        .map(|idx| data[idx])
        .collect();

    let bar = get_progress_bar(
        "Refining dictionary".to_string(),
        params.max_iterations,
        params.verbose,
    );
    let (labels, step) = refine(data, &mut dict, params, rng, Some(&bar))?;
    bar.finish();

    Ok(Codebook::new(dict, labels, vec![step]))
}
