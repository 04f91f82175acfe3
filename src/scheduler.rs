use std::{fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OptimError, Result};

/// A learning-rate schedule.
///
/// Given the number of completed iterations, returns the learning rate to use
/// for the next update. `get` is a pure read: implementations hold
/// configuration only, so one schedule instance can back several optimizers
/// concurrently.
pub trait Scheduler: Send + Sync {
    /// Returns the learning rate after `n_iterations` completed updates.
    fn get(&self, n_iterations: u64) -> f64;
}

/// A schedule that always returns the same learning rate.
///
/// This is what a plain number given to [`Optimizer::new`] is normalized
/// into, so the rest of the crate only ever talks to a schedule.
///
/// [`Optimizer::new`]: crate::Optimizer::new
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    learning_rate: f64,
}

impl Constant {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Scheduler for Constant {
    fn get(&self, _n_iterations: u64) -> f64 {
        self.learning_rate
    }
}

/// A learning rate as accepted at optimizer construction: either a fixed
/// number or a shared schedule object. Both answer `get(n_iterations)`, so no
/// caller ever branches on which one it got.
#[derive(Clone)]
pub enum LearningRate {
    /// A plain number, normalized into a constant schedule.
    Fixed(Constant),
    /// A schedule shared with (possibly) other optimizers.
    Schedule(Arc<dyn Scheduler>),
}

impl LearningRate {
    pub fn get(&self, n_iterations: u64) -> f64 {
        match self {
            LearningRate::Fixed(constant) => constant.get(n_iterations),
            LearningRate::Schedule(scheduler) => scheduler.get(n_iterations),
        }
    }

    /// Checks that a fixed rate is finite and non-negative.
    ///
    /// Schedule objects are trusted: their configuration was validated when
    /// they were built.
    ///
    /// # Errors
    /// Returns `OptimError::InvalidLearningRate` for a negative or non-finite
    /// fixed rate.
    pub(crate) fn validate(&self) -> Result<()> {
        if let LearningRate::Fixed(constant) = self {
            let got = constant.get(0);
            if !got.is_finite() || got < 0.0 {
                return Err(OptimError::InvalidLearningRate { got });
            }
        }

        Ok(())
    }
}

impl From<f64> for LearningRate {
    fn from(learning_rate: f64) -> Self {
        LearningRate::Fixed(Constant::new(learning_rate))
    }
}

impl From<Constant> for LearningRate {
    fn from(constant: Constant) -> Self {
        LearningRate::Fixed(constant)
    }
}

impl From<Arc<dyn Scheduler>> for LearningRate {
    fn from(scheduler: Arc<dyn Scheduler>) -> Self {
        LearningRate::Schedule(scheduler)
    }
}

impl fmt::Debug for LearningRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningRate::Fixed(constant) => f.debug_tuple("Fixed").field(constant).finish(),
            LearningRate::Schedule(_) => f.debug_tuple("Schedule").finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_constant_ignores_iteration_count() {
        let schedule = Constant::new(0.5);

        assert_eq!(schedule.get(0), 0.5);
        assert_eq!(schedule.get(1), 0.5);
        assert_eq!(schedule.get(1_000_000), 0.5);
    }

    #[test]
    fn test_number_normalizes_to_fixed_schedule() {
        let lr = LearningRate::from(0.1);

        assert!(matches!(lr, LearningRate::Fixed(_)));
        assert_eq!(lr.get(0), 0.1);
        assert_eq!(lr.get(42), 0.1);
    }

    #[test]
    fn test_validate_rejects_negative_and_non_finite() {
        assert!(LearningRate::from(-0.1).validate().is_err());
        assert!(LearningRate::from(f64::NAN).validate().is_err());
        assert!(LearningRate::from(f64::INFINITY).validate().is_err());
        assert!(LearningRate::from(0.0).validate().is_ok());
        assert!(LearningRate::from(0.1).validate().is_ok());
    }

    #[test]
    fn test_shared_schedule_is_consulted() {
        struct Halving;

        impl Scheduler for Halving {
            fn get(&self, n_iterations: u64) -> f64 {
                1.0 / (1u64 << n_iterations.min(32)) as f64
            }
        }

        let schedule: Arc<dyn Scheduler> = Arc::new(Halving);
        let lr = LearningRate::from(Arc::clone(&schedule));

        assert_eq!(lr.get(0), 1.0);
        assert_eq!(lr.get(1), 0.5);
        assert_eq!(lr.get(2), 0.25);
    }
}
