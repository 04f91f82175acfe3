//! Weight initializers.
//!
//! An initializer produces a fresh value for a parameter the model has not
//! seen before: a scalar for the common one-new-feature case (`shape == 1`),
//! or an array for vectorized weights.

use ndarray::Array1;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::Distribution;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OptimError, Result};

/// A freshly initialized weight value.
///
/// `shape == 1` requests yield [`Scalar`](InitialValue::Scalar) with the
/// exact value, never a one-element array.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    Scalar(f64),
    Array(Array1<f64>),
}

impl InitialValue {
    /// Returns the scalar value, or `None` for an array.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            InitialValue::Scalar(value) => Some(*value),
            InitialValue::Array(_) => None,
        }
    }

    /// Returns the array value, or `None` for a scalar.
    pub fn array(&self) -> Option<&Array1<f64>> {
        match self {
            InitialValue::Scalar(_) => None,
            InitialValue::Array(values) => Some(values),
        }
    }
}

/// A strategy for producing initial weight values.
///
/// The receiver is `&mut` because stochastic strategies advance their random
/// stream on every call: draws are order-dependent, so one instance must not
/// be shared across threads without external synchronization. Constant
/// strategies never observe the mutability.
pub trait Initializer {
    /// A stable, human-readable identity for logging and display.
    fn name(&self) -> &'static str;

    /// Returns a fresh set of weights: a scalar for `shape == 1`, an array of
    /// `shape` values otherwise.
    fn initialize(&mut self, shape: usize) -> InitialValue;
}

/// Always returns the same value.
///
/// Deterministic and referentially transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Initializer for Constant {
    fn name(&self) -> &'static str {
        "Constant"
    }

    fn initialize(&mut self, shape: usize) -> InitialValue {
        if shape == 1 {
            InitialValue::Scalar(self.value)
        } else {
            InitialValue::Array(Array1::from_elem(shape, self.value))
        }
    }
}

/// Always returns zeros. A named convenience for `Constant::new(0.0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zeros;

impl Initializer for Zeros {
    fn name(&self) -> &'static str {
        "Zeros"
    }

    fn initialize(&mut self, shape: usize) -> InitialValue {
        Constant::new(0.0).initialize(shape)
    }
}

/// Draws from a normal distribution with mean `mu` and standard deviation
/// `sigma`.
///
/// The instance exclusively owns its random stream. With a seed, the same
/// sequence of shape requests against a freshly constructed instance
/// reproduces the same draws; without one, the stream is seeded from the OS.
pub struct Normal {
    mu: f64,
    sigma: f64,
    dist: rand_distr::Normal<f64>,
    rng: StdRng,
}

impl Normal {
    /// Creates a new `Normal`.
    ///
    /// # Errors
    /// Returns `OptimError::InvalidDistribution` if `mu` or `sigma` is
    /// non-finite, or `sigma` is negative.
    pub fn new(mu: f64, sigma: f64, seed: Option<u64>) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(OptimError::InvalidDistribution { mu, sigma });
        }

        let dist = rand_distr::Normal::new(mu, sigma)
            .map_err(|_| OptimError::InvalidDistribution { mu, sigma })?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            mu,
            sigma,
            dist,
            rng,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Initializer for Normal {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn initialize(&mut self, shape: usize) -> InitialValue {
        if shape == 1 {
            InitialValue::Scalar(self.dist.sample(&mut self.rng))
        } else {
            InitialValue::Array(Array1::from_shape_fn(shape, |_| {
                self.dist.sample(&mut self.rng)
            }))
        }
    }
}
