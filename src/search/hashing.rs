//! Transposition-table decorator
//!
//! Positions reached through different move orders, or related by a board
//! symmetry, are searched once per call. Before a child is searched the table
//! is probed with every symmetry hash of the child's state; on a usable hit
//! the cached value replaces the recursion, on a miss the subtree is searched
//! and its value stored under the primary hash.
//!
//! Folding symmetric positions is only sound when the evaluator gives
//! symmetric positions the same value. The table is cleared at the start of
//! every search, so nothing carries over between calls.

use super::evaluator::Evaluator;
use super::minimax::MinimaxStrategy;
use super::node::{NodeId, TreeOf};
use super::tt::{Bound, TranspositionTable};
use super::zobrist::ZobristHasher;
use crate::core::{Problem, Value};
use log::{debug, trace};
use std::borrow::Cow;

pub const DEFAULT_TABLE_ENTRIES: usize = 1 << 16;

/// States that carry a Zobrist hash.
pub trait ZobristHashable {
    /// Hash of the position including the side to move.
    fn zobrist_hash(&self) -> u64;

    /// Hashes of all symmetric images of the position. Defaults to the
    /// primary hash alone, i.e. no symmetry folding.
    fn symmetry_hashes(&self) -> Cow<'_, [u64]> {
        Cow::Owned(vec![self.zobrist_hash()])
    }
}

impl ZobristHashable for ZobristHasher {
    fn zobrist_hash(&self) -> u64 {
        self.hash()
    }

    fn symmetry_hashes(&self) -> Cow<'_, [u64]> {
        Cow::Borrowed(ZobristHasher::symmetry_hashes(self))
    }
}

/// Minimax decorator backed by a transposition table.
///
/// The evaluator of the wrapped strategy must be invariant under the board
/// symmetries the states report, otherwise folding changes results.
pub struct HashingMinimaxSearch<M> {
    inner: M,
    table: TranspositionTable,
}

impl<M> HashingMinimaxSearch<M>
where
    M: MinimaxStrategy,
    <M::Problem as Problem>::State: ZobristHashable,
{
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, DEFAULT_TABLE_ENTRIES)
    }

    pub fn with_capacity(inner: M, entries: usize) -> Self {
        Self {
            inner,
            table: TranspositionTable::new(entries),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    fn remaining_depth(&self, tree: &TreeOf<M::Problem>, node: NodeId) -> usize {
        self.inner.depth_limit().saturating_sub(tree.node(node).depth)
    }

    fn lookup(&self, tree: &TreeOf<M::Problem>, node: NodeId) -> Option<Value> {
        let remaining = self.remaining_depth(tree, node);
        let n = tree.node(node);
        for &hash in n.state.symmetry_hashes().iter() {
            let Some(entry) = self.table.get(hash) else {
                continue;
            };
            if entry.depth != remaining {
                continue;
            }
            // A bound is only as good as the cutoff it would cause here.
            let usable = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => entry.score >= n.beta,
                Bound::Upper => entry.score <= n.alpha,
            };
            if usable {
                trace!("table hit at depth {}: {:?}", n.depth, entry);
                return Some(entry.score);
            }
        }
        None
    }
}

impl<M> MinimaxStrategy for HashingMinimaxSearch<M>
where
    M: MinimaxStrategy,
    <M::Problem as Problem>::State: ZobristHashable,
{
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
        debug!(
            "clearing transposition table: {} of {} slots used",
            self.table.occupied(),
            self.table.capacity()
        );
        self.table.clear();
        self.inner.init_search(tree, root)
    }

    fn expand_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        self.inner.expand_min_node(tree, node)
    }

    fn expand_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        self.inner.expand_max_node(tree, node)
    }

    fn continue_after_min_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        self.inner.continue_after_min_node(tree, node)
    }

    fn continue_after_max_node(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> bool {
        self.inner.continue_after_max_node(tree, node)
    }

    fn cached_value(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) -> Option<Value> {
        match self.lookup(tree, node) {
            Some(value) => Some(value),
            None => self.inner.cached_value(tree, node),
        }
    }

    fn node_evaluated(&mut self, tree: &mut TreeOf<Self::Problem>, node: NodeId) {
        let remaining = self.remaining_depth(tree, node);
        let n = tree.node(node);
        let (alpha, beta) = n.window;
        let bound = if n.leaf {
            Bound::Exact
        } else if n.value <= alpha {
            Bound::Upper
        } else if n.value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table
            .store(n.state.zobrist_hash(), remaining, n.value, bound);
        self.inner.node_evaluated(tree, node)
    }
}
