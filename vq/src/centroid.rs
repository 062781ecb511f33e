use matrix::{zero_row, Element, FlexMatrix, Rounding};

use crate::errors::VqError;

/// Per-label element sums and member counts.
fn cluster_sums<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    size: usize,
) -> Result<(FlexMatrix<T, W>, Vec<usize>), VqError> {
    if data.len() != labels.len() {
        return Err(VqError::LabelCountMismatch {
            labels: labels.len(),
            rows: data.len(),
        });
    }
    let mut sums = vec![zero_row::<T, W>(); size];
    let mut counts = vec![0usize; size];
    for (row, label) in data.iter().zip(labels) {
        let Some(sum) = sums.get_mut(*label) else {
            return Err(VqError::LabelOutOfRange {
                label: *label,
                size,
            });
        };
        sum.iter_mut().zip(row).for_each(|(s, x)| *s += *x);
        counts[*label] += 1;
    }
    Ok((sums, counts))
}

/// Recomputes a dictionary of `size` entries, entry `j` being the mean of
/// the rows labelled `j`.
///
/// Every label in `0..size` needs at least one row. The assignment step
/// guarantees this, so an empty label is reported as an internal error.
pub fn update_centroids<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    size: usize,
    rounding: Rounding,
) -> Result<FlexMatrix<T, W>, VqError> {
    let (mut dict, counts) = cluster_sums(data, labels, size)?;
    for (label, (entry, count)) in dict.iter_mut().zip(counts).enumerate() {
        if count == 0 {
            return Err(VqError::EmptyCluster(label));
        }
        T::average(entry, count, rounding);
    }
    Ok(dict)
}

/// Same as [`update_centroids`], sized by the largest label.
pub fn update_centroids_from_max<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    rounding: Rounding,
) -> Result<FlexMatrix<T, W>, VqError> {
    let max_label = labels.iter().max().ok_or(VqError::EmptyDataset)?;
    update_centroids(data, labels, max_label + 1, rounding)
}

/// Recomputes the dictionary, keeping the previous entry for labels without
/// rows. Only meant for datasets with fewer rows than dictionary entries,
/// where some entries can never be populated.
pub fn update_centroids_retaining<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    previous: &FlexMatrix<T, W>,
    rounding: Rounding,
) -> Result<FlexMatrix<T, W>, VqError> {
    let (mut dict, counts) = cluster_sums(data, labels, previous.len())?;
    for ((entry, count), old) in dict.iter_mut().zip(counts).zip(previous) {
        if count == 0 {
            *entry = *old;
        } else {
            T::average(entry, count, rounding);
        }
    }
    Ok(dict)
}
