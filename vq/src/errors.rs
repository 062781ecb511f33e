use matrix::MatrixError;
use thiserror::Error;

/// Coarse classification of a [`VqError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something unusable. Reported before any work starts.
    InvalidArgument,
    /// A broken internal invariant, i.e. a bug.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VqError {
    #[error("Dataset is empty")]
    EmptyDataset,
    #[error("Dictionary size must be at least 1")]
    ZeroDictSize,
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Can not draw {requested} distinct samples from {population} rows")]
    SampleTooLarge { requested: usize, population: usize },
    #[error("Got {labels} labels for {rows} rows")]
    LabelCountMismatch { labels: usize, rows: usize },
    #[error("Label {label} is out of range for {size} dictionary entries")]
    LabelOutOfRange { label: usize, size: usize },
    #[error("Data needs accumulations up to {bound:e}, the element type holds {limit:e}")]
    MagnitudeTooLarge { bound: f64, limit: f64 },
    #[error("Dictionary entry {0} has no assigned rows")]
    EmptyCluster(usize),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl VqError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDataset => ErrorKind::InvalidArgument,
            Self::ZeroDictSize => ErrorKind::InvalidArgument,
            Self::InvalidParams(_) => ErrorKind::InvalidArgument,
            Self::SampleTooLarge { .. } => ErrorKind::InvalidArgument,
            Self::LabelCountMismatch { .. } => ErrorKind::InvalidArgument,
            Self::LabelOutOfRange { .. } => ErrorKind::InvalidArgument,
            Self::MagnitudeTooLarge { .. } => ErrorKind::InvalidArgument,
            Self::Matrix(_) => ErrorKind::InvalidArgument,
            Self::EmptyCluster(_) => ErrorKind::Internal,
        }
    }
}
