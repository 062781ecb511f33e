use matrix::{squared_distance, Element, FlexMatrix};

use crate::errors::VqError;

/// Total squared quantization error of `data` against `dict` under `labels`.
pub fn distortion<T: Element, const W: usize>(
    data: &FlexMatrix<T, W>,
    dict: &FlexMatrix<T, W>,
    labels: &[usize],
) -> Result<f64, VqError> {
    if data.len() != labels.len() {
        return Err(VqError::LabelCountMismatch {
            labels: labels.len(),
            rows: data.len(),
        });
    }
    let mut total = 0.0;
    for (row, label) in data.iter().zip(labels) {
        let entry = dict.get(*label).ok_or(VqError::LabelOutOfRange {
            label: *label,
            size: dict.len(),
        })?;
        total += squared_distance(row, entry).to_f64();
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_squared_errors() {
        let data = vec![[0.0f64, 0.0], [0.0, 1.0], [10.0, 0.0]];
        let dict = vec![[0.0, 0.5], [10.0, 0.0]];
        assert_eq!(distortion(&data, &dict, &[0, 0, 1]).unwrap(), 0.5);
        assert!(distortion(&data, &dict, &[0, 0, 2]).is_err());
    }
}
