use matrix::{Element, FlexMatrix};
use serde::{Deserialize, Serialize};

use crate::distortion::distortion;
use crate::errors::VqError;
use crate::refine::Refinement;

/// How the refinement runs of a generation call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Every refinement run reached a fixed point.
    pub converged: bool,
    /// Refinement passes over all runs.
    pub iterations: usize,
    /// One entry per dictionary size the generator refined at.
    pub steps: Vec<Refinement>,
}

impl Report {
    pub fn from_steps(steps: Vec<Refinement>) -> Report {
        Report {
            converged: steps.iter().all(|s| s.converged),
            iterations: steps.iter().map(|s| s.iterations).sum(),
            steps,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Codebook<T: Element, const W: usize> {
    pub dict: FlexMatrix<T, W>,
    /// Index into `dict` of the nearest entry, one per dataset row.
    pub labels: Vec<usize>,
    pub report: Report,
}

impl<T: Element, const W: usize> Codebook<T, W> {
    pub fn new(dict: FlexMatrix<T, W>, labels: Vec<usize>, steps: Vec<Refinement>) -> Self {
        Codebook {
            dict,
            labels,
            report: Report::from_steps(steps),
        }
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    pub fn into_parts(self) -> (FlexMatrix<T, W>, Vec<usize>) {
        (self.dict, self.labels)
    }

    /// Total squared quantization error of `data`, which must be the
    /// dataset this codebook was generated from.
    pub fn distortion(&self, data: &FlexMatrix<T, W>) -> Result<f64, VqError> {
        distortion(data, &self.dict, &self.labels)
    }
}
