use matrix::{squared_distance, Element, FlexMatrix, Row};
use rand::Rng;
use rayon::prelude::*;

use crate::errors::VqError;
use crate::sampler::random_samples;

/// Index of the dictionary entry closest to `row`. The first of equal
/// minima wins. `dict` must not be empty.
pub fn nearest_entry<T: Element, const W: usize>(
    row: &Row<T, W>,
    dict: &FlexMatrix<T, W>,
) -> usize {
    let mut best = 0;
    let mut best_dist = squared_distance(row, &dict[0]);
    for (idx, entry) in dict.iter().enumerate().skip(1) {
        let dist = squared_distance(row, entry);
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    best
}

/// Labels every row with its nearest dictionary entry, without repairing
/// empty entries.
///
/// The dataset is the outer loop: the dictionary is usually much smaller
/// and stays in cache for the whole pass.
pub fn nearest_labels<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    dict: &FlexMatrix<T, W>,
    parallel: bool,
) -> Vec<usize> {
    if dict.is_empty() {
        return vec![0; data.len()];
    }
    if parallel {
        data.par_iter().map(|row| nearest_entry(row, dict)).collect()
    } else {
        data.iter().map(|row| nearest_entry(row, dict)).collect()
    }
}

/// Number of rows per label in `0..size`.
pub fn histogram(labels: &[usize], size: usize) -> Result<Vec<usize>, VqError> {
    let mut counts = vec![0usize; size];
    for label in labels {
        match counts.get_mut(*label) {
            Some(count) => *count += 1,
            None => {
                return Err(VqError::LabelOutOfRange {
                    label: *label,
                    size,
                })
            }
        }
    }
    Ok(counts)
}

/// Forces a row onto every label in `0..size` that has none.
///
/// Rows are visited in uniformly random order and each empty label, in
/// ascending order, takes the next row whose current label can spare it.
/// Returns how many labels were filled, which is less than the number of
/// empty labels only when there are fewer rows than labels.
pub fn repair_empty_clusters<R: Rng + ?Sized>(
    labels: &mut [usize],
    size: usize,
    rng: &mut R,
) -> Result<usize, VqError> {
    let mut counts = histogram(labels, size)?;
    let empty: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(label, _)| label)
        .collect();
    if empty.is_empty() {
        return Ok(0);
    }
    let mut empty = empty.into_iter().peekable();

    let mut repaired = 0;
    for row in random_samples(rng, labels.len(), labels.len())? {
        let Some(&target) = empty.peek() else {
            break;
        };
        let current = labels[row];
        if counts[current] < 2 {
            continue;
        }
        counts[current] -= 1;
        counts[target] += 1;
        labels[row] = target;
        empty.next();
        repaired += 1;
    }
    Ok(repaired)
}

/// Nearest-entry labels, with empty entries repaired so that the next
/// centroid update has a row for every entry.
pub fn assign_labels<T: Element, const W: usize, R: Rng + ?Sized>(
    data: &FlexMatrix<T, W>,
    dict: &FlexMatrix<T, W>,
    rng: &mut R,
    parallel: bool,
) -> Result<Vec<usize>, VqError> {
    let mut labels = nearest_labels(data, dict, parallel);
    let repaired = repair_empty_clusters(&mut labels, dict.len(), rng)?;
    if repaired > 0 {
        tracing::trace!(repaired, size = dict.len(), "repaired empty dictionary entries");
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ties_go_to_lowest_index() {
        let dict = vec![[1.0f32, 0.0], [-1.0, 0.0], [1.0, 0.0]];
        assert_eq!(nearest_entry(&[0.0, 0.0], &dict), 0);
        assert_eq!(nearest_entry(&[2.0, 0.0], &dict), 0);
        assert_eq!(nearest_entry(&[-2.0, 5.0], &dict), 1);
    }

    #[test]
    fn parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(4);
        let data: FlexMatrix<f32, 8> = matrix::gen_rand_rows(500, &mut rng);
        let dict: FlexMatrix<f32, 8> = matrix::gen_rand_rows(7, &mut rng);
        assert_eq!(
            nearest_labels(&data, &dict, false),
            nearest_labels(&data, &dict, true)
        );
    }

    #[test]
    fn histogram_rejects_out_of_range() {
        assert_eq!(histogram(&[0, 1, 1], 2).unwrap(), vec![1, 2]);
        assert_eq!(
            histogram(&[0, 2], 2),
            Err(VqError::LabelOutOfRange { label: 2, size: 2 })
        );
    }

    #[test]
    fn repair_fills_every_empty_label() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut labels = vec![0, 0, 0, 0, 1, 1];
        let repaired = repair_empty_clusters(&mut labels, 5, &mut rng).unwrap();
        assert_eq!(repaired, 3);
        let counts = histogram(&labels, 5).unwrap();
        assert!(counts.iter().all(|c| *c > 0));
    }

    #[test]
    fn repair_never_empties_a_label() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut labels = vec![0, 1, 1, 2];
            repair_empty_clusters(&mut labels, 4, &mut rng).unwrap();
            assert_eq!(histogram(&labels, 4).unwrap(), vec![1, 1, 1, 1]);
            assert_eq!(labels[0], 0);
            assert_eq!(labels[3], 2);
        }
    }

    #[test]
    fn repair_with_fewer_rows_than_labels() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut labels = vec![0, 0, 1];
        let repaired = repair_empty_clusters(&mut labels, 5, &mut rng).unwrap();
        assert_eq!(repaired, 1);
        assert_eq!(histogram(&labels, 5).unwrap(), vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn nothing_to_repair() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut labels = vec![1, 0];
        assert_eq!(repair_empty_clusters(&mut labels, 2, &mut rng).unwrap(), 0);
        assert_eq!(labels, vec![1, 0]);
    }
}
