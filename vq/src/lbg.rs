use matrix::{Element, FlexMatrix};
use rand::Rng;

use crate::assign::assign_labels;
use crate::centroid::update_centroids;
use crate::check_inputs;
use crate::codebook::Codebook;
use crate::errors::VqError;
use crate::helpers::get_progress_bar;
use crate::mode::mode_with_array;
use crate::params::Params;
use crate::refine::{refine, Refinement};
use crate::split::{split_entry, split_offset};

/// Grows a dictionary of `dict_size` entries one split at a time (LBG).
///
/// Starts from the centroid of the whole dataset. Each growth step splits
/// the most populated entry into two nearby entries and refines the
/// enlarged dictionary until its labels settle or the iteration cap is hit.
pub fn generate_dict<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    dict_size: usize,
    params: &Params,
) -> Result<Codebook<T, W>, VqError> {
    let mut rng = params.rng();
    generate_dict_with_rng(data, dict_size, params, &mut rng)
}

pub fn generate_dict_with_rng<T: Element, const W: usize, R: Rng + ?Sized>(
    data: &FlexMatrix<T, W>,
    dict_size: usize,
    params: &Params,
    rng: &mut R,
) -> Result<Codebook<T, W>, VqError> {
    check_inputs(data, dict_size, params)?;
    if dict_size > data.len() {
        tracing::warn!(
            rows = data.len(),
            dict_size,
            "more dictionary entries than rows, some entries will stay unused"
        );
    }

    let bar = get_progress_bar("Growing dictionary".to_string(), dict_size, params.verbose);

    let mut labels = vec![0; data.len()];
    let mut dict = update_centroids(data, &labels, 1, params.rounding)?;
    let mut steps = vec![Refinement {
        size: 1,
        iterations: 0,
        converged: true,
    }];
    bar.inc(1);

    for size in 2..=dict_size {
        labels = assign_labels(data, &dict, rng, params.parallel)?;
        let target = mode_with_array(&labels, dict.len() - 1)?;
        let offset = split_offset(
            params.split_direction,
            data,
            &labels,
            target,
            &dict[target],
            params.perturbation,
            rng,
        );
        split_entry(&mut dict, target, &offset)?;

        let (new_labels, step) = refine(data, &mut dict, params, rng, None)?;
        labels = new_labels;
        tracing::debug!(
            size,
            split = target,
            iterations = step.iterations,
            converged = step.converged,
            "grew dictionary"
        );
        steps.push(step);
        bar.inc(1);
    }
    bar.finish();

    Ok(Codebook::new(dict, labels, steps))
}
