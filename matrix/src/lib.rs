mod element;
pub mod errors;

pub use element::{Element, Rounding};
pub use errors::MatrixError;

use ndarray::Array2;
use rand::Rng;

/// A fixed-width row of numeric elements.
pub type Row<T, const W: usize> = [T; W];

/// Rows with a compile-time height.
pub type FixMatrix<T, const W: usize, const H: usize> = [Row<T, W>; H];

/// Ordered, index-addressable rows. Used both for datasets and dictionaries.
pub type FlexMatrix<T, const W: usize> = Vec<Row<T, W>>;

pub fn zero_row<T: Element, const W: usize>() -> Row<T, W> {
    [T::ZERO; W]
}

/// Squared euclidean distance, accumulated in the element type itself.
pub fn squared_distance<T: Element, const W: usize>(a: &Row<T, W>, b: &Row<T, W>) -> T {
    let mut acc = T::ZERO;
    for (x, y) in a.iter().zip(b) {
        let diff = *x - *y;
        acc += diff * diff;
    }
    acc
}

pub fn fix_to_flex<T: Element, const W: usize, const H: usize>(
    fix: &FixMatrix<T, W, H>,
) -> FlexMatrix<T, W> {
    fix.to_vec()
}

/// Builds a matrix from rows whose width is only known at runtime.
pub fn flex_from_rows<T: Element, const W: usize>(
    rows: &[Vec<T>],
) -> Result<FlexMatrix<T, W>, MatrixError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            <[T; W]>::try_from(row.as_slice()).map_err(|_| MatrixError::WidthMismatch {
                row: idx,
                expected: W,
                found: row.len(),
            })
        })
        .collect()
}

pub fn from_array2<T: Element, const W: usize>(
    array: &Array2<T>,
) -> Result<FlexMatrix<T, W>, MatrixError> {
    if array.ncols() != W {
        return Err(MatrixError::WidthMismatch {
            row: 0,
            expected: W,
            found: array.ncols(),
        });
    }
    Ok(array
        .rows()
        .into_iter()
        .map(|row| {
            let mut out = zero_row::<T, W>();
            out.iter_mut().zip(row.iter()).for_each(|(o, x)| *o = *x);
            out
        })
        .collect())
}

pub fn to_array2<T: Element, const W: usize>(matrix: &FlexMatrix<T, W>) -> Array2<T> {
    Array2::from_shape_fn((matrix.len(), W), |(row, col)| matrix[row][col])
}

pub fn gen_rand_rows<R: Rng + ?Sized, const W: usize>(n: usize, rng: &mut R) -> FlexMatrix<f32, W> {
    (0..n)
        .map(|_| std::array::from_fn(|_| rng.gen::<f32>()))
        .collect()
}
