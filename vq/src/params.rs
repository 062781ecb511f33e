use matrix::Rounding;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::VqError;
use crate::split::SplitDirection;

pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_PERTURBATION: f64 = 1e-5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Cap on refinement passes, per growth step for the splitting variant.
    pub max_iterations: usize,
    /// Magnitude of the offset separating the two halves of a split entry.
    pub perturbation: f64,
    pub split_direction: SplitDirection,
    pub rounding: Rounding,
    /// Runs the nearest-entry search on the rayon pool.
    pub parallel: bool,
    /// None seeds every call from system entropy.
    pub seed: Option<u64>,
    /// Shows a progress bar.
    pub verbose: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            perturbation: DEFAULT_PERTURBATION,
            split_direction: SplitDirection::default(),
            rounding: Rounding::default(),
            parallel: false,
            seed: None,
            verbose: false,
        }
    }
}

impl Params {
    pub fn from_max_iterations(max_iterations: usize) -> Params {
        Params {
            max_iterations,
            ..Default::default()
        }
    }

    pub fn from_seed(seed: u64) -> Params {
        Params {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn from(
        max_iterations: Option<usize>,
        split_direction: Option<SplitDirection>,
        rounding: Option<Rounding>,
        seed: Option<u64>,
    ) -> Params {
        Params {
            max_iterations: max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            split_direction: split_direction.unwrap_or_default(),
            rounding: rounding.unwrap_or_default(),
            seed,
            ..Default::default()
        }
    }

    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Params, VqError> {
        let params: Params =
            serde_json::from_str(json).map_err(|e| VqError::InvalidParams(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// A fresh generator for one call, seeded from `seed` when set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn validate(&self) -> Result<(), VqError> {
        if self.max_iterations == 0 {
            return Err(VqError::InvalidParams(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(VqError::InvalidParams(format!(
                "perturbation must be finite and non-negative, got {}",
                self.perturbation
            )));
        }
        Ok(())
    }
}
