use std::{fmt::Display, hash::Hash};

use crate::{Gradient, OptimError, Result, UpdateRule, Weights};

/// Plain stochastic gradient descent: each parameter takes a step against its
/// gradient, scaled by the learning rate.
///
/// This is the canonical update rule; momentum and adaptive-rate variants
/// plug into the same [`UpdateRule`] extension point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgd;

impl<K: Eq + Hash + Display> UpdateRule<K> for Sgd {
    fn name(&self) -> &'static str {
        "Sgd"
    }

    /// Applies `w[k] -= lr * g[k]` for every gradient key.
    ///
    /// # Errors
    /// Returns `OptimError::MissingParameter` if any gradient key is absent
    /// from the weight vector. The check runs up front, so a failed call
    /// leaves the weights untouched.
    fn update_after_pred(&mut self, w: &mut Weights<K>, g: &Gradient<K>, lr: f64) -> Result<()> {
        if let Some(key) = g.keys().find(|key| !w.contains_key(*key)) {
            return Err(OptimError::MissingParameter {
                key: key.to_string(),
            });
        }

        for (key, gi) in g {
            if let Some(wi) = w.get_mut(key) {
                *wi -= lr * gi;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::Optimizer;

    #[test]
    fn test_subtracts_scaled_gradient() {
        let mut opt = Optimizer::new(Sgd, 0.1).unwrap();
        let mut w = HashMap::from([("a", 1.0)]);
        let g = HashMap::from([("a", 0.5)]);

        opt.update_after_pred(&mut w, &g).unwrap();

        assert_eq!(w["a"], 1.0 - 0.1 * 0.5);
        assert_eq!(opt.n_iterations(), 1);
        assert_eq!(opt.learning_rate(), 0.1);
    }

    #[test]
    fn test_untouched_weights_keep_their_value() {
        let mut opt = Optimizer::new(Sgd, 0.5).unwrap();
        let mut w = HashMap::from([("a", 1.0), ("b", 2.0)]);
        let g = HashMap::from([("a", 1.0)]);

        opt.update_after_pred(&mut w, &g).unwrap();

        assert_eq!(w["a"], 0.5);
        assert_eq!(w["b"], 2.0);
    }

    #[test]
    fn test_missing_key_fails_without_mutating() {
        let mut opt = Optimizer::new(Sgd, 0.1).unwrap();
        let mut w = HashMap::from([("a", 1.0)]);
        let g = HashMap::from([("a", 0.5), ("ghost", 1.0)]);

        let err = opt.update_after_pred(&mut w, &g).unwrap_err();

        assert_eq!(
            err,
            OptimError::MissingParameter {
                key: "ghost".into()
            }
        );
        assert_eq!(w["a"], 1.0);
        assert_eq!(opt.n_iterations(), 0);
    }
}
