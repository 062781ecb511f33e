//! Codebook generation for vector quantization.
//!
//! Two generators build a dictionary of representative rows for a dataset,
//! both minimizing the squared quantization error:
//! - [`generate_dict`] grows the dictionary by splitting its most populated
//!   entry (Linde-Buzo-Gray) and refines after every split;
//! - [`generate_dict_fast`] draws the whole dictionary from the dataset and
//!   refines once (Lloyd / k-means).
//!
//! Randomness comes from the generator passed to the `*_with_rng` variants,
//! or from one seeded per call out of [`Params::seed`].

pub mod assign;
pub mod centroid;
mod codebook;
pub mod distortion;
pub mod errors;
mod fast;
mod helpers;
mod lbg;
pub mod mode;
pub mod params;
pub mod refine;
pub mod sampler;
pub mod split;

pub use codebook::{Codebook, Report};
pub use errors::{ErrorKind, VqError};
pub use fast::{generate_dict_fast, generate_dict_fast_with_rng};
pub use lbg::{generate_dict, generate_dict_with_rng};
pub use params::Params;
pub use refine::Refinement;
pub use split::SplitDirection;

pub use matrix::{Element, FlexMatrix, Rounding, Row};

pub(crate) fn check_inputs<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    dict_size: usize,
    params: &Params,
) -> Result<(), VqError> {
    if data.is_empty() {
        return Err(VqError::EmptyDataset);
    }
    if dict_size == 0 {
        return Err(VqError::ZeroDictSize);
    }
    params.validate()?;

    let bound = accumulation_bound(data, params.perturbation);
    if bound.is_nan() || bound > T::LIMIT {
        return Err(VqError::MagnitudeTooLarge {
            bound,
            limit: T::LIMIT,
        });
    }
    Ok(())
}

/// Largest value the element type has to hold while generating from `data`.
///
/// Distances and centroid sums are accumulated in the element type. Every
/// dictionary entry stays within the bounding box of `data` widened by at
/// most one split offset per element, which bounds both the squared
/// distance of a row to an entry and the per-element sum over all rows.
pub(crate) fn accumulation_bound<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    perturbation: f64,
) -> f64 {
    let mut low = [f64::INFINITY; W];
    let mut high = [f64::NEG_INFINITY; W];
    for row in data {
        for ((lo, hi), x) in low.iter_mut().zip(high.iter_mut()).zip(row) {
            *lo = lo.min(x.to_f64());
            *hi = hi.max(x.to_f64());
        }
    }
    if data.is_empty() {
        return 0.0;
    }

    let ranges: Vec<f64> = low.iter().zip(&high).map(|(lo, hi)| hi - lo).collect();
    // principal axis offsets scale with the spread, integer ones round up to a unit
    let spread = (2.0 * ranges.iter().map(|r| r * r).sum::<f64>()).sqrt();
    let margin = perturbation * spread.max(1.0) + 1.0;

    let distance: f64 = ranges.iter().map(|r| (r + margin).powi(2)).sum();
    let magnitude = low
        .iter()
        .zip(&high)
        .map(|(lo, hi)| lo.abs().max(hi.abs()) + margin)
        .fold(0.0, f64::max);
    distance.max(data.len() as f64 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_checked_before_work() {
        let empty: FlexMatrix<f32, 2> = vec![];
        let params = Params::default();
        assert_eq!(
            generate_dict(&empty, 2, &params).unwrap_err(),
            VqError::EmptyDataset
        );
        let pair: FlexMatrix<f32, 2> = vec![[1.0, 2.0]];
        assert_eq!(
            generate_dict_fast(&pair, 0, &params).unwrap_err(),
            VqError::ZeroDictSize
        );
        let single: FlexMatrix<f32, 1> = vec![[1.0]];
        let err = generate_dict(&single, 1, &Params::from_max_iterations(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn wide_integer_ranges_are_rejected() {
        let wide: FlexMatrix<i32, 2> = vec![[100_000, 0], [0, 0], [100_000, 1]];
        let err = generate_dict(&wide, 2, &Params::from_seed(0)).unwrap_err();
        assert!(matches!(err, VqError::MagnitudeTooLarge { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(generate_dict_fast(&wide, 2, &Params::from_seed(0)).is_err());

        let wide: FlexMatrix<i64, 2> = vec![[100_000, 0], [0, 0], [100_000, 1]];
        let codebook = generate_dict(&wide, 2, &Params::from_seed(0)).unwrap();
        assert_eq!(codebook.labels[0], codebook.labels[2]);
        assert_ne!(codebook.labels[0], codebook.labels[1]);
    }

    #[test]
    fn bound_covers_distances_and_sums() {
        let data: FlexMatrix<i32, 2> = vec![[0, 0], [10, -20]];
        let bound = accumulation_bound(&data, 0.0);
        assert!(bound >= 10.0 * 10.0 + 20.0 * 20.0);
        assert!(bound >= 2.0 * 20.0);
        assert!(bound <= i32::LIMIT);
    }
}
