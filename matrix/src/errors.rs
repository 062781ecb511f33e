use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Row {row} has width {found}, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}
