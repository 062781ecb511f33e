use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// How integer centroids are averaged. Floats ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Plain integer division. Biases centroids towards zero.
    #[default]
    Truncate,
    /// Rounds half away from zero.
    Nearest,
}

pub trait Element:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + 'static
{
    const ZERO: Self;
    /// Largest magnitude the type holds, as `f64`.
    const LIMIT: f64;

    /// Integers truncate towards zero.
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    /// Turns the per-element sums of a cluster with `count` members into
    /// their mean, in place. `count` must not be zero.
    fn average(sums: &mut [Self], count: usize, rounding: Rounding);
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0.0;
            const LIMIT: f64 = <$t>::MAX as f64;

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn average(sums: &mut [Self], count: usize, _rounding: Rounding) {
                // one reciprocal per cluster, multiplied across the row
                let inv = 1.0 / count as $t;
                sums.iter_mut().for_each(|x| *x *= inv);
            }
        }
    )*};
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0;
            const LIMIT: f64 = <$t>::MAX as f64;

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn average(sums: &mut [Self], count: usize, rounding: Rounding) {
                let n = count as $t;
                match rounding {
                    Rounding::Truncate => sums.iter_mut().for_each(|x| *x /= n),
                    Rounding::Nearest => sums.iter_mut().for_each(|x| {
                        let (quot, rem) = (*x / n, *x % n);
                        // |rem| < n, so neither side can overflow
                        *x = if rem.abs() < n - rem.abs() {
                            quot
                        } else if *x >= 0 {
                            quot + 1
                        } else {
                            quot - 1
                        };
                    }),
                }
            }
        }
    )*};
}

impl_float_element!(f32, f64);
impl_int_element!(i32, i64);
