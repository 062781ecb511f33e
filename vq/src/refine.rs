use indicatif::ProgressBar;
use matrix::{Element, FlexMatrix};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assign::assign_labels;
use crate::centroid::{update_centroids, update_centroids_retaining};
use crate::errors::VqError;
use crate::params::Params;

/// Outcome of one run of the assign/update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    /// Dictionary size the loop ran at.
    pub size: usize,
    pub iterations: usize,
    /// False when the loop stopped on the iteration cap.
    pub converged: bool,
}

/// Lloyd iterations on `dict`: labels are recomputed against the updated
/// dictionary until they stop changing or `params.max_iterations` passes
/// ran. Returns labels matching the final `dict` in either case.
pub fn refine<T: Element, const W: usize, R: Rng + ?Sized>(
    data: &FlexMatrix<T, W>,
    dict: &mut FlexMatrix<T, W>,
    params: &Params,
    rng: &mut R,
    bar: Option<&ProgressBar>,
) -> Result<(Vec<usize>, Refinement), VqError> {
    let mut labels = assign_labels(data, dict, rng, params.parallel)?;
    // entries can not all be populated
    let underpopulated = data.len() < dict.len();

    let mut changed = true;
    let mut iterations = 0;
    while changed && iterations < params.max_iterations {
        *dict = if underpopulated {
            update_centroids_retaining(data, &labels, dict, params.rounding)?
        } else {
            update_centroids(data, &labels, dict.len(), params.rounding)?
        };
        let new_labels = assign_labels(data, dict, rng, params.parallel)?;
        changed = new_labels != labels;
        labels = new_labels;
        iterations += 1;

        tracing::trace!(size = dict.len(), iterations, changed, "refinement pass");
        if let Some(bar) = bar {
            bar.inc(1);
        }
    }

    if changed {
        tracing::warn!(
            size = dict.len(),
            iterations,
            "refinement hit the iteration cap before labels settled"
        );
    } else {
        tracing::debug!(size = dict.len(), iterations, "refinement converged");
    }

    Ok((
        labels,
        Refinement {
            size: dict.len(),
            iterations,
            converged: !changed,
        },
    ))
}
