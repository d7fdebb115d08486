//! Search tree storage
//!
//! Nodes live in a flat arena and refer to their parent by index, so the
//! back-reference used for alpha/beta bookkeeping never owns anything.

use crate::core::{Mover, Problem, Value};
use crate::error::SearchError;

pub type NodeId = usize;

/// One position in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    pub state: S,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
    pub depth: usize,
    pub value: Value,
    /// Set once the value has been computed (by evaluation, back-up or cache).
    pub evaluated: bool,
    /// True when `value` came straight from the evaluator.
    pub leaf: bool,
    pub alpha: Value,
    pub beta: Value,
    /// The (alpha, beta) window as it stood when the node was opened.
    pub window: (Value, Value),
    pub children: Vec<NodeId>,
    /// Child whose value was backed up into this node.
    pub best_child: Option<NodeId>,
    pub expanded: bool,
}

impl<S, A> SearchNode<S, A> {
    fn new(state: S, parent: Option<NodeId>, action: Option<A>, depth: usize) -> Self {
        Self {
            state,
            parent,
            action,
            depth,
            value: 0.0,
            evaluated: false,
            leaf: false,
            alpha: Value::NEG_INFINITY,
            beta: Value::INFINITY,
            window: (Value::NEG_INFINITY, Value::INFINITY),
            children: Vec::new(),
            best_child: None,
            expanded: false,
        }
    }

    /// The role of this node in the recursion (root is MAX).
    pub fn mover(&self) -> Mover {
        Mover::at_depth(self.depth)
    }
}

/// Counters collected during one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub leaves_evaluated: usize,
    /// Sibling lists abandoned because a continue hook said stop.
    pub cutoffs: usize,
    /// Children never visited because of those cutoffs.
    pub pruned_children: usize,
    /// Children whose value came from the transposition table.
    pub cache_hits: usize,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes_expanded += other.nodes_expanded;
        self.leaves_evaluated += other.leaves_evaluated;
        self.cutoffs += other.cutoffs;
        self.pruned_children += other.pruned_children;
        self.cache_hits += other.cache_hits;
    }
}

/// Arena of search nodes rooted at index 0.
#[derive(Debug, Clone)]
pub struct SearchTree<S, A> {
    nodes: Vec<SearchNode<S, A>>,
    pub stats: SearchStats,
}

pub type TreeOf<P> = SearchTree<<P as Problem>::State, <P as Problem>::Action>;

impl<S: Clone, A: Clone + std::fmt::Debug> SearchTree<S, A> {
    pub fn new(root: S) -> Self {
        Self {
            nodes: vec![SearchNode::new(root, None, None, 0)],
            stats: SearchStats::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Nodes created so far, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<S, A> {
        &mut self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn value(&self, id: NodeId) -> Value {
        self.nodes[id].value
    }

    /// Stores a node's value. A leaf value is final and never overwritten.
    pub fn set_value(&mut self, id: NodeId, value: Value) {
        let node = &mut self.nodes[id];
        if node.leaf {
            return;
        }
        node.value = value;
        node.evaluated = true;
    }

    pub fn set_leaf_value(&mut self, id: NodeId, value: Value) {
        let node = &mut self.nodes[id];
        if node.leaf {
            return;
        }
        node.value = value;
        node.evaluated = true;
        node.leaf = true;
    }

    /// Remembers the node's current bounds as the window it is searched with.
    pub fn open_window(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.window = (node.alpha, node.beta);
    }

    /// Materializes the successors of `id` in the order the problem wants
    /// them searched. Each child gets its own clone of the parent state.
    pub fn expand<P>(&mut self, id: NodeId, problem: &P) -> Result<Vec<NodeId>, SearchError>
    where
        P: Problem<State = S, Action = A>,
    {
        if !self.nodes[id].expanded {
            let depth = self.nodes[id].depth;
            let mut actions = problem.generate_actions(&self.nodes[id].state);
            problem.order_actions(&self.nodes[id].state, &mut actions);

            let mut children = Vec::with_capacity(actions.len());
            for action in actions {
                let state = &self.nodes[id].state;
                if !problem.is_legal(state, &action) {
                    return Err(SearchError::IllegalAction {
                        depth,
                        action: format!("{:?}", action),
                    });
                }
                let next = problem.apply(state, &action);
                let child = self.nodes.len();
                self.nodes
                    .push(SearchNode::new(next, Some(id), Some(action), depth + 1));
                children.push(child);
            }

            let node = &mut self.nodes[id];
            node.children = children;
            node.expanded = true;
            self.stats.nodes_expanded += 1;
        }
        Ok(self.nodes[id].children.clone())
    }

    /// Actions along the chain of best children starting at the root.
    pub fn principal_variation(&self) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = self.nodes[self.root()].best_child;
        while let Some(id) = current {
            if let Some(action) = &self.nodes[id].action {
                actions.push(action.clone());
            }
            current = self.nodes[id].best_child;
        }
        actions
    }
}
