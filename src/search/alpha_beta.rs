//! Alpha-beta pruning as a decorator over any minimax strategy.
//!
//! The wrapped strategy keeps deciding what gets expanded; this layer only
//! narrows the window and stops sibling lists that cannot influence the
//! decision. The chosen root action is the same as without pruning.

use super::evaluator::Evaluator;
use super::minimax::MinimaxStrategy;
use super::node::{NodeId, TreeOf};
use crate::core::{Problem, Value};
use log::trace;

pub struct AlphaBetaSearch<M> {
    inner: M,
}

impl<M: MinimaxStrategy> AlphaBetaSearch<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Copies the parent's window down so the subtree is searched inside it.
    pub fn pass_on_alpha_beta(tree: &mut TreeOf<M::Problem>, node: NodeId) {
        if let Some(parent) = tree.parent(node) {
            let (alpha, beta) = {
                let p = tree.node(parent);
                (p.alpha, p.beta)
            };
            let n = tree.node_mut(node);
            n.alpha = alpha;
            n.beta = beta;
        }
    }
}

impl<M: MinimaxStrategy> MinimaxStrategy for AlphaBetaSearch<M> {
    type Problem = M::Problem;

    fn problem(&self) -> &Self::Problem {
        self.inner.problem()
    }

    fn evaluator(&self) -> &dyn Evaluator<<Self::Problem as Problem>::State> {
        self.inner.evaluator()
    }

    fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator<<Self::Problem as Problem>::State>>) {
        self.inner.set_evaluator(evaluator)
    }

    fn depth_limit(&self) -> usize {
        self.inner.depth_limit()
    }

    fn set_depth_limit(&mut self, limit: usize) {
        self.inner.set_depth_limit(limit)
    }

    fn init_search(&mut self, tree: &mut TreeOf<Self::Problem>, root: NodeId) {
        let node = tree.node_mut(root);
        node.alpha = Value::NEG_INFINITY;
        node.beta = Value::INFINITY;
        self.inner.init_search(tree, root)
    }

    fn expand_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        if self.inner.expand_min_node(tree, node) {
            Self::pass_on_alpha_beta(tree, node);
            return true;
        }
        false
    }

    fn expand_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        if self.inner.expand_max_node(tree, node) {
            Self::pass_on_alpha_beta(tree, node);
            return true;
        }
        false
    }

    fn continue_after_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        if !self.inner.continue_after_min_node(tree, node) {
            return false;
        }
        let Some(parent) = tree.parent(node) else {
            return true;
        };
        let value = tree.value(node);
        let p = tree.node_mut(parent);

        // MAX already has at least `value` here, and MIN above has a
        // better alternative: the parent will never be chosen.
        if value >= p.beta {
            trace!("beta cutoff: {} >= {}", value, p.beta);
            return false;
        }
        p.alpha = p.alpha.max(value);
        true
    }

    fn continue_after_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        if !self.inner.continue_after_max_node(tree, node) {
            return false;
        }
        let Some(parent) = tree.parent(node) else {
            return true;
        };
        let value = tree.value(node);
        let p = tree.node_mut(parent);

        if value <= p.alpha {
            trace!("alpha cutoff: {} <= {}", value, p.alpha);
            return false;
        }
        p.beta = p.beta.min(value);
        true
    }

    fn cached_value(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> Option<Value> {
        self.inner.cached_value(tree, node)
    }

    fn node_evaluated(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) {
        self.inner.node_evaluated(tree, node)
    }
}
