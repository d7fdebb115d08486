//! # Linear Evaluation
//!
//! A weighted sum of named feature functions. Each feature maps a state to a
//! number, conventionally in `[-1, 1]`, and is multiplied by one weight. The
//! weights are exactly the genes of a trained [`WeightIndividual`], which is
//! how the genetic engine tunes the evaluation.
//!
//! [`WeightIndividual`]: crate::genetics::WeightIndividual

use super::evaluator::Evaluator;
use crate::core::Value;
use crate::error::SearchError;
use std::fmt;
use std::sync::Arc;

type FeatureFn<S> = dyn Fn(&S) -> Value + Send + Sync;

/// A named feature function.
pub struct Feature<S> {
    name: String,
    f: Arc<FeatureFn<S>>,
}

impl<S> Feature<S> {
    pub fn new(name: &str, f: impl Fn(&S) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: name.to_string(),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, state: &S) -> Value {
        (self.f)(state)
    }
}

impl<S> Clone for Feature<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<S> fmt::Debug for Feature<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Feature").field("name", &self.name).finish()
    }
}

/// `sum(weight_i * feature_i(state))`
#[derive(Debug, Clone)]
pub struct LinearEvaluator<S> {
    name: String,
    features: Vec<Feature<S>>,
    weights: Vec<Value>,
}

impl<S> LinearEvaluator<S> {
    pub fn new(name: &str, features: Vec<Feature<S>>, weights: Vec<Value>) -> Result<Self, SearchError> {
        if features.len() != weights.len() {
            return Err(SearchError::WeightCountMismatch {
                features: features.len(),
                weights: weights.len(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            features,
            weights,
        })
    }

    /// All weights set to 1.
    pub fn uniform(name: &str, features: Vec<Feature<S>>) -> Self {
        let weights = vec![1.0; features.len()];
        Self {
            name: name.to_string(),
            features,
            weights,
        }
    }

    pub fn weights(&self) -> &[Value] {
        &self.weights
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name()).collect()
    }

    /// Per-feature contributions, useful when inspecting trained weights.
    pub fn breakdown(&self, state: &S) -> Vec<(&str, Value)> {
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, w)| (feature.name(), w * feature.value(state)))
            .collect()
    }
}

impl<S> Evaluator<S> for LinearEvaluator<S> {
    fn eval(&self, state: &S) -> Value {
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, w)| w * feature.value(state))
            .sum()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> Vec<Feature<i32>> {
        vec![
            Feature::new("identity", |s: &i32| *s as f64),
            Feature::new("sign", |s: &i32| s.signum() as f64),
        ]
    }

    #[test]
    fn test_weighted_sum() {
        let eval = LinearEvaluator::new("lin", features(), vec![0.5, -2.0]).unwrap();
        assert_eq!(eval.eval(&4), 0.5 * 4.0 - 2.0);
        assert_eq!(eval.eval(&-2), -1.0 + 2.0);
        assert_eq!(eval.name(), "lin");
        assert_eq!(eval.feature_names(), vec!["identity", "sign"]);
    }

    #[test]
    fn test_weight_count_must_match() {
        let err = LinearEvaluator::new("lin", features(), vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            SearchError::WeightCountMismatch {
                features: 2,
                weights: 1
            }
        );
    }

    #[test]
    fn test_breakdown_sums_to_eval() {
        let eval = LinearEvaluator::new("lin", features(), vec![3.0, 1.5]).unwrap();
        let total: f64 = eval.breakdown(&7).iter().map(|(_, v)| v).sum();
        assert_eq!(total, eval.eval(&7));
        assert_eq!(LinearEvaluator::uniform("u", features()).weights(), &[1.0, 1.0]);
    }
}
