use matrix::{Element, FlexMatrix, Row};
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::VqError;

const POWER_ITERATIONS: usize = 100;
const POWER_TOL: f64 = 1e-12;

/// Direction along which a dictionary entry is pushed apart when split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    /// Independent uniform offset per element.
    #[default]
    Random,
    /// Principal axis of the covariance of the rows assigned to the entry.
    /// Falls back to `Random` for entries with less than two rows or no
    /// spread.
    PrincipalAxis,
}

/// Each element is `(u - 0.5) * perturbation` with `u` uniform in `[0, 1)`.
/// Integer elements truncate to zero.
pub fn random_offset<T: Element, const W: usize, R: Rng + ?Sized>(
    rng: &mut R,
    perturbation: f64,
) -> Row<T, W> {
    std::array::from_fn(|_| T::from_f64((rng.gen::<f64>() - 0.5) * perturbation))
}

/// Unit principal axis and the variance along it, for the rows labelled
/// `label` taken around `center`.
pub fn principal_axis<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    label: usize,
    center: &Row<T, W>,
) -> Option<(Array1<f64>, f64)> {
    let members: Vec<&Row<T, W>> = data
        .iter()
        .zip(labels)
        .filter(|(_, l)| **l == label)
        .map(|(row, _)| row)
        .collect();
    if members.len() < 2 {
        return None;
    }

    let centered = Array2::from_shape_fn((members.len(), W), |(i, j)| {
        members[i][j].to_f64() - center[j].to_f64()
    });
    let covariance = centered.t().dot(&centered) / (members.len() - 1) as f64;

    // start from the member farthest from the center
    let mut axis = centered
        .rows()
        .into_iter()
        .max_by(|a, b| a.dot(a).total_cmp(&b.dot(b)))?
        .to_owned();
    let norm = axis.dot(&axis).sqrt();
    if norm <= f64::EPSILON {
        return None;
    }
    axis /= norm;

    for _ in 0..POWER_ITERATIONS {
        let mut next = covariance.dot(&axis);
        let norm = next.dot(&next).sqrt();
        if norm <= f64::EPSILON {
            return None;
        }
        next /= norm;
        let delta: f64 = (&next - &axis).mapv(f64::abs).sum();
        axis = next;
        if delta < POWER_TOL {
            break;
        }
    }
    let variance = axis.dot(&covariance.dot(&axis));
    Some((axis, variance))
}

/// Offset along the principal axis, scaled by the spread of the entry's
/// rows.
///
/// When the scaled offset truncates to zero, as it does for integer
/// elements unless the spread is huge, the offset becomes one unit along
/// the axis's largest component instead.
pub fn principal_offset<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    label: usize,
    center: &Row<T, W>,
    perturbation: f64,
) -> Option<Row<T, W>> {
    let (axis, variance) = principal_axis(data, labels, label, center)?;
    let scale = perturbation * variance.sqrt().max(1.0);
    let offset: Row<T, W> = std::array::from_fn(|j| T::from_f64(axis[j] * scale));
    if perturbation == 0.0 || offset.iter().any(|x| x.to_f64() != 0.0) {
        return Some(offset);
    }
    let widest = axis.iter().fold(0.0, |m: f64, a| m.max(a.abs()));
    Some(std::array::from_fn(|j| T::from_f64((axis[j] / widest).round())))
}

pub fn split_offset<T: Element, const W: usize, R: Rng + ?Sized>(
    direction: SplitDirection,
    data: &FlexMatrix<T, W>,
    labels: &[usize],
    label: usize,
    center: &Row<T, W>,
    perturbation: f64,
    rng: &mut R,
) -> Row<T, W> {
    match direction {
        SplitDirection::Random => random_offset(rng, perturbation),
        SplitDirection::PrincipalAxis => {
            match principal_offset(data, labels, label, center, perturbation) {
                Some(offset) => offset,
                None => {
                    tracing::debug!(label, "no principal axis, splitting randomly");
                    random_offset(rng, perturbation)
                }
            }
        }
    }
}

/// Replaces entry `index` by `old + offset` and inserts `old - offset`
/// right after it.
pub fn split_entry<T: Element, const W: usize>(
    dict: &mut FlexMatrix<T, W>,
    index: usize,
    offset: &Row<T, W>,
) -> Result<(), VqError> {
    let old = *dict.get(index).ok_or(VqError::LabelOutOfRange {
        label: index,
        size: dict.len(),
    })?;
    dict[index] = std::array::from_fn(|j| old[j] + offset[j]);
    dict.insert(index + 1, std::array::from_fn(|j| old[j] - offset[j]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn random_offset_is_small() {
        let mut rng = StdRng::seed_from_u64(3);
        let offset: Row<f64, 16> = random_offset(&mut rng, 1e-5);
        assert!(offset.iter().all(|x| x.abs() <= 0.5e-5));
        assert!(offset.iter().any(|x| *x != 0.0));
    }

    #[test]
    fn int_offset_truncates_to_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let offset: Row<i32, 4> = random_offset(&mut rng, 1e-5);
        assert_eq!(offset, [0; 4]);
    }

    #[test]
    fn split_inserts_adjacent_pair() {
        let mut dict = vec![[0.0f32, 0.0], [5.0, 5.0], [9.0, 9.0]];
        split_entry(&mut dict, 1, &[0.5, -0.25]).unwrap();
        assert_eq!(
            dict,
            vec![[0.0, 0.0], [5.5, 4.75], [4.5, 5.25], [9.0, 9.0]]
        );
        assert!(split_entry(&mut dict, 4, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn principal_axis_of_elongated_cluster() {
        let data = vec![
            [-10.0f64, 0.1],
            [-5.0, -0.1],
            [5.0, 0.1],
            [10.0, -0.1],
            [50.0, 50.0],
        ];
        let labels = vec![0, 0, 0, 0, 1];
        let (axis, variance) = principal_axis(&data, &labels, 0, &[0.0, 0.0]).unwrap();
        assert!(axis[0].abs() > 0.999);
        assert!(variance > 50.0);
    }

    #[test]
    fn integer_principal_offset_is_at_least_one_unit() {
        let data: FlexMatrix<i32, 2> = vec![[-40, 1], [-20, 0], [20, 0], [40, -1]];
        let offset = principal_offset(&data, &[0; 4], 0, &[0, 0], 1e-5).unwrap();
        assert_eq!(offset[0].abs(), 1);
        assert_eq!(offset[1], 0);

        let float: FlexMatrix<f64, 2> = vec![[-40.0, 1.0], [-20.0, 0.0], [20.0, 0.0], [40.0, -1.0]];
        let offset = principal_offset(&float, &[0; 4], 0, &[0.0, 0.0], 1e-5).unwrap();
        assert!(offset[0].abs() < 1e-3 && offset[0] != 0.0);
    }

    #[test]
    fn principal_axis_needs_two_rows() {
        let data = vec![[1.0f64, 1.0], [2.0, 2.0]];
        assert!(principal_axis(&data, &[0, 1], 0, &[1.0, 1.0]).is_none());

        let same = vec![[1.0f64, 1.0], [1.0, 1.0]];
        assert!(principal_axis(&same, &[0, 0], 0, &[1.0, 1.0]).is_none());
    }

    #[test]
    fn principal_offset_falls_back_to_random() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = vec![[1.0f64, 1.0]];
        let offset: Row<f64, 2> = split_offset(
            SplitDirection::PrincipalAxis,
            &data,
            &[0],
            0,
            &[1.0, 1.0],
            1e-5,
            &mut rng,
        );
        assert!(offset.iter().all(|x| x.abs() <= 0.5e-5));
    }
}
