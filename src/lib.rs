//! Shared update protocol for online gradient-based optimizers, together
//! with the weight initializers used to seed parameters as they are
//! discovered during streaming learning.
//!
//! A model drives the [`Optimizer`] once per example: an optional
//! pre-prediction adjustment, then the actual update once the gradient is
//! known. Concrete algorithms differ only in the [`UpdateRule`] they plug in;
//! the lifecycle, iteration counting, and learning-rate scheduling are shared
//! here. [`initializers`] are consumed by models independently, whenever a
//! previously unseen feature needs a weight.

pub mod initializers;

mod error;
mod optimizer;
mod scheduler;
mod sgd;

pub use error::{OptimError, Result};
pub use optimizer::{Gradient, Optimizer, UpdateRule, Weights};
pub use scheduler::{Constant, LearningRate, Scheduler};
pub use sgd::Sgd;
