use std::{collections::HashMap, fmt, marker::PhantomData};

use log::trace;

use crate::{scheduler::LearningRate, Result};

/// A weight vector: feature key to parameter value, owned by the model and
/// mutated in place across its lifetime.
pub type Weights<K> = HashMap<K, f64>;

/// The per-parameter gradient for one example. Produced fresh per example and
/// owned by the caller.
pub type Gradient<K> = HashMap<K, f64>;

/// The per-algorithm update rule, the one piece that distinguishes concrete
/// optimizers.
///
/// The surrounding [`Optimizer`] owns the iteration counter and the
/// learning-rate schedule; implementations of this trait only do the
/// per-parameter arithmetic.
pub trait UpdateRule<K> {
    /// A stable, human-readable identity for logging and display.
    fn name(&self) -> &'static str;

    /// Adjusts the weights before a prediction is made.
    ///
    /// The default is a no-op. Lookahead-style algorithms that need to shift
    /// the weights ahead of the prediction override this; it must never fail
    /// for a well-formed weight vector.
    fn update_before_pred(&mut self, _w: &mut Weights<K>) {}

    /// Updates the weights given the gradient of one example and the current
    /// learning rate.
    ///
    /// # Errors
    /// Implementations that require every gradient key to already exist in
    /// `w` should return `OptimError::MissingParameter` rather than silently
    /// skipping the key. The base lifecycle performs no validation of its
    /// own.
    fn update_after_pred(&mut self, w: &mut Weights<K>, g: &Gradient<K>, lr: f64) -> Result<()>;
}

/// The shared lifecycle of every online gradient-based optimizer.
///
/// An optimizer is driven by a model once per streaming example:
///
/// 1. `update_before_pred` - pre-prediction adjustment (usually a no-op),
/// 2. the model predicts and computes a gradient,
/// 3. `update_after_pred` - the actual update, after which the iteration
///    counter advances by exactly one.
///
/// The learning rate is never stored; it is derived on demand from the
/// schedule and the current iteration count, so reading it twice with no
/// intervening update yields the same value.
pub struct Optimizer<K, R> {
    rule: R,
    lr: LearningRate,
    n_iterations: u64,
    _key: PhantomData<fn(&K)>,
}

impl<K, R: UpdateRule<K>> Optimizer<K, R> {
    /// Creates a new `Optimizer`.
    ///
    /// # Arguments
    /// * `rule` - The concrete per-parameter update rule.
    /// * `lr` - Either a plain non-negative number or a shared
    ///   [`Scheduler`](crate::Scheduler). A number is normalized into a
    ///   constant schedule here, at the boundary, so nothing downstream
    ///   branches on which form was given.
    ///
    /// # Errors
    /// Returns `OptimError::InvalidLearningRate` if a fixed rate is negative
    /// or non-finite.
    pub fn new(rule: R, lr: impl Into<LearningRate>) -> Result<Self> {
        let lr = lr.into();
        lr.validate()?;

        Ok(Self {
            rule,
            lr,
            n_iterations: 0,
            _key: PhantomData,
        })
    }

    /// Returns the learning rate as of the current iteration count.
    pub fn learning_rate(&self) -> f64 {
        self.lr.get(self.n_iterations)
    }

    /// Returns the number of completed post-prediction updates.
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// Adjusts the weights before a prediction is made.
    ///
    /// Delegates to the rule's pre-prediction hook; the iteration counter is
    /// never touched by this phase.
    pub fn update_before_pred(&mut self, w: &mut Weights<K>) {
        self.rule.update_before_pred(w);
    }

    /// Updates the weights given the gradient of one example.
    ///
    /// The rule runs with the learning rate of the *current* (pre-increment)
    /// iteration count, so the schedule sees iterations starting at 0. The
    /// counter then advances by exactly one, even if the rule had nothing to
    /// do (an empty gradient still counts as an iteration).
    ///
    /// # Errors
    /// Propagates the rule's error unchanged. A failed update does not count
    /// as a completed iteration.
    pub fn update_after_pred(&mut self, w: &mut Weights<K>, g: &Gradient<K>) -> Result<()> {
        let lr = self.lr.get(self.n_iterations);
        self.rule.update_after_pred(w, g, lr)?;
        self.n_iterations += 1;

        trace!(
            "{}: completed iteration {} with lr {lr}",
            self.rule.name(),
            self.n_iterations
        );

        Ok(())
    }
}

impl<K, R: UpdateRule<K>> fmt::Display for Optimizer<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule.name())
    }
}

impl<K, R: UpdateRule<K> + fmt::Debug> fmt::Debug for Optimizer<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("rule", &self.rule)
            .field("lr", &self.lr)
            .field("n_iterations", &self.n_iterations)
            .finish()
    }
}
