//! Depth-limited minimax
//!
//! [`MinimaxStrategy`] captures the extension points of the recursive walk.
//! The walk itself never changes: strategies only decide whether a child is
//! visited at all, whether the remaining siblings are still worth visiting,
//! and whether a value can be taken from a cache instead of recursing.
//! Pruning ([`AlphaBetaSearch`]) and hashing ([`HashingMinimaxSearch`]) are
//! decorators that own an inner strategy and delegate everything they do not
//! change, so they compose in any order.
//!
//! [`AlphaBetaSearch`]: super::alpha_beta::AlphaBetaSearch
//! [`HashingMinimaxSearch`]: super::hashing::HashingMinimaxSearch

use super::evaluator::Evaluator;
use super::node::{NodeId, SearchStats, SearchTree, TreeOf};
use crate::core::{Mover, Problem, Value};
use crate::error::SearchError;
use log::{debug, trace};

/// Outcome of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// Action leading to the best child of the root.
    pub action: A,
    /// Backed-up value of the root.
    pub value: Value,
    /// Expected line of play, starting with `action`.
    pub principal_variation: Vec<A>,
    pub stats: SearchStats,
}

/// A minimax search strategy.
///
/// A MIN node is a node where the minimizing side chooses, i.e. a child of a
/// MAX node; the root is a MAX node.
pub trait MinimaxStrategy {
    type Problem: Problem;

    fn problem(&self) -> &Self::Problem;

    fn evaluator(&self) -> &dyn Evaluator<<Self::Problem as Problem>::State>;

    fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator<<Self::Problem as Problem>::State>>);

    fn depth_limit(&self) -> usize;

    fn set_depth_limit(&mut self, limit: usize);

    /// Resets strategy-specific per-node fields before the walk starts.
    fn init_search(&mut self, _tree: &mut TreeOf<Self::Problem>, _root: NodeId) {}

    /// Whether the MIN node `node` is visited at all.
    fn expand_min_node(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) -> bool {
        true
    }

    /// Whether the MAX node `node` is visited at all.
    fn expand_max_node(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) -> bool {
        true
    }

    /// Called after the MIN node `node` got its value. `false` abandons the
    /// remaining siblings of `node`.
    fn continue_after_min_node(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) -> bool {
        true
    }

    /// Called after the MAX node `node` got its value. `false` abandons the
    /// remaining siblings of `node`.
    fn continue_after_max_node(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) -> bool {
        true
    }

    /// A value for `node` that makes searching below it unnecessary.
    fn cached_value(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) -> Option<Value> {
        None
    }

    /// Called once `node` has been searched (not for cache hits).
    fn node_evaluated(&mut self, _tree: &mut TreeOf<Self::Problem>, _node: NodeId) {}

    /// Runs a full search from `root` and returns the best root action.
    fn search(
        &mut self,
        root: &<Self::Problem as Problem>::State,
    ) -> Result<SearchResult<<Self::Problem as Problem>::Action>, SearchError> {
        run_search(self, root)
    }
}

impl<M: MinimaxStrategy + ?Sized> MinimaxStrategy for Box<M> {
    type Problem = M::Problem;

    fn problem(&self) -> &Self::Problem {
        (**self).problem()
    }

    fn evaluator(&self) -> &dyn Evaluator<<Self::Problem as Problem>::State> {
        (**self).evaluator()
    }

    fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator<<Self::Problem as Problem>::State>>) {
        (**self).set_evaluator(evaluator)
    }

    fn depth_limit(&self) -> usize {
        (**self).depth_limit()
    }

    fn set_depth_limit(&mut self, limit: usize) {
        (**self).set_depth_limit(limit)
    }

    fn init_search(&mut self, tree: &mut TreeOf<Self::Problem>, root: NodeId) {
        (**self).init_search(tree, root)
    }

    fn expand_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        (**self).expand_min_node(tree, node)
    }

    fn expand_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        (**self).expand_max_node(tree, node)
    }

    fn continue_after_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        (**self).continue_after_min_node(tree, node)
    }

    fn continue_after_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        (**self).continue_after_max_node(tree, node)
    }

    fn cached_value(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> Option<Value> {
        (**self).cached_value(tree, node)
    }

    fn node_evaluated(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) {
        (**self).node_evaluated(tree, node)
    }
}

/// Plain full-width minimax: every hook says yes.
pub struct MinimaxSearch<P: Problem> {
    problem: P,
    evaluator: Box<dyn Evaluator<P::State>>,
    depth_limit: usize,
}

impl<P: Problem> MinimaxSearch<P> {
    pub fn new(problem: P, evaluator: impl Evaluator<P::State> + 'static, depth_limit: usize) -> Self {
        Self::with_boxed_evaluator(problem, Box::new(evaluator), depth_limit)
    }

    pub fn with_boxed_evaluator(
        problem: P,
        evaluator: Box<dyn Evaluator<P::State>>,
        depth_limit: usize,
    ) -> Self {
        Self {
            problem,
            evaluator,
            depth_limit,
        }
    }
}

impl<P: Problem> MinimaxStrategy for MinimaxSearch<P> {
    type Problem = P;

    fn problem(&self) -> &P {
        &self.problem
    }

    fn evaluator(&self) -> &dyn Evaluator<P::State> {
        self.evaluator.as_ref()
    }

    fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator<P::State>>) {
        self.evaluator = evaluator;
    }

    fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    fn set_depth_limit(&mut self, limit: usize) {
        self.depth_limit = limit;
    }
}

fn run_search<M: MinimaxStrategy + ?Sized>(
    strategy: &mut M,
    root: &<M::Problem as Problem>::State,
) -> Result<SearchResult<<M::Problem as Problem>::Action>, SearchError> {
    let limit = strategy.depth_limit();
    if limit == 0 {
        return Err(SearchError::InvalidDepthLimit { limit });
    }
    if strategy.problem().is_terminal(root) {
        return Err(SearchError::NoMoveAvailable);
    }

    let mut tree = SearchTree::new(root.clone());
    let root_id = tree.root();
    strategy.init_search(&mut tree, root_id);
    tree.open_window(root_id);

    let value = visit(strategy, &mut tree, root_id)?;

    let best = tree
        .node(root_id)
        .best_child
        .ok_or(SearchError::NoMoveAvailable)?;
    let action = tree
        .node(best)
        .action
        .clone()
        .ok_or(SearchError::NoMoveAvailable)?;

    debug!(
        "search depth {} value {:.4}: {} nodes in tree, {} expanded, {} leaves, {} cutoffs, {} cache hits",
        limit,
        value,
        tree.node_count(),
        tree.stats.nodes_expanded,
        tree.stats.leaves_evaluated,
        tree.stats.cutoffs,
        tree.stats.cache_hits
    );

    Ok(SearchResult {
        action,
        value,
        principal_variation: tree.principal_variation(),
        stats: tree.stats,
    })
}

// Post-order walk of one node. Returns the node's value.
fn visit<M: MinimaxStrategy + ?Sized>(
    strategy: &mut M,
    tree: &mut TreeOf<M::Problem>,
    id: NodeId,
) -> Result<Value, SearchError> {
    let depth = tree.node(id).depth;
    if depth >= strategy.depth_limit() || strategy.problem().is_terminal(&tree.node(id).state) {
        return evaluate_leaf(strategy, tree, id);
    }

    let children = tree.expand(id, strategy.problem())?;
    if children.is_empty() {
        return Err(SearchError::NoActions { depth });
    }

    let mover = Mover::at_depth(depth);
    let child_role = mover.opponent();
    let mut best: Option<(NodeId, Value)> = None;

    for (index, &child) in children.iter().enumerate() {
        let expand = match child_role {
            Mover::Min => strategy.expand_min_node(tree, child),
            Mover::Max => strategy.expand_max_node(tree, child),
        };
        if !expand {
            continue;
        }
        tree.open_window(child);

        let value = match strategy.cached_value(tree, child) {
            Some(value) => {
                tree.stats.cache_hits += 1;
                tree.set_value(child, value);
                value
            }
            None => {
                let value = visit(strategy, tree, child)?;
                strategy.node_evaluated(tree, child);
                value
            }
        };

        if best.map_or(true, |(_, incumbent)| mover.prefers(value, incumbent)) {
            best = Some((child, value));
        }

        let proceed = match child_role {
            Mover::Min => strategy.continue_after_min_node(tree, child),
            Mover::Max => strategy.continue_after_max_node(tree, child),
        };
        if !proceed {
            let remaining = children.len() - index - 1;
            if remaining > 0 {
                trace!("cutoff at depth {}: {} siblings skipped", depth + 1, remaining);
                tree.stats.cutoffs += 1;
                tree.stats.pruned_children += remaining;
            }
            break;
        }
    }

    match best {
        Some((child, value)) => {
            tree.set_value(id, value);
            tree.node_mut(id).best_child = Some(child);
            Ok(value)
        }
        // nothing visited
        None => evaluate_leaf(strategy, tree, id),
    }
}

fn evaluate_leaf<M: MinimaxStrategy + ?Sized>(
    strategy: &M,
    tree: &mut TreeOf<M::Problem>,
    id: NodeId,
) -> Result<Value, SearchError> {
    let node = tree.node(id);
    if node.leaf {
        return Ok(node.value);
    }
    let value = strategy.evaluator().eval(&node.state);
    if value.is_nan() {
        return Err(SearchError::NonNumericEvaluation { depth: node.depth });
    }
    tree.set_leaf_value(id, value);
    tree.stats.leaves_evaluated += 1;
    Ok(value)
}
