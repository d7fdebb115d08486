//! Evaluator trait for state evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::Value;

/// Trait for evaluating states at the search horizon
pub trait Evaluator<S>: Send + Sync {
    /// Evaluate the state from the root mover's perspective
    ///
    /// Returns:
    ///   - Positive score: advantage for the side the search maximizes for
    ///   - Negative score: advantage for the opponent
    ///
    /// Must be pure. The search treats a NaN result as a broken evaluator.
    fn eval(&self, state: &S) -> Value;

    /// Get evaluator name for debugging
    fn name(&self) -> &str {
        "evaluator"
    }
}

impl<S, E: Evaluator<S> + ?Sized> Evaluator<S> for Box<E> {
    fn eval(&self, state: &S) -> Value {
        (**self).eval(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Evaluator backed by a plain function or closure.
pub struct FnEvaluator<F> {
    name: String,
    f: F,
}

impl<F> FnEvaluator<F> {
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: name.to_string(),
            f,
        }
    }
}

impl<S, F> Evaluator<S> for FnEvaluator<F>
where
    F: Fn(&S) -> Value + Send + Sync,
{
    fn eval(&self, state: &S) -> Value {
        (self.f)(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
