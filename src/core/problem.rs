//! Problem definition consumed by the search
//!
//! The concrete game lives outside the engine. It is plugged in by
//! implementing [`Problem`] for a rules object.

use std::fmt::Debug;

/// The rules of a two-player, perfect-information game.
///
/// States are owned values: the engine clones a state for every branch it
/// explores and never hands the same state to two siblings. Implementers
/// should make game-significant parts deep copies and geometry-invariant
/// parts cheap shared references (`Arc`).
pub trait Problem {
    type State: Clone + PartialEq + Debug;
    type Action: Clone + PartialEq + Debug;

    /// All legal actions in `state`, in a reproducible order.
    fn generate_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Successor of `state` after `action`. Must not modify `state`.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Legality check run by the engine before every `apply`.
    ///
    /// A generated action that fails this check is a bug in the model and
    /// aborts the search.
    fn is_legal(&self, _state: &Self::State, _action: &Self::Action) -> bool {
        true
    }

    /// Whether the game is over in `state`.
    fn is_terminal(&self, _state: &Self::State) -> bool {
        false
    }

    /// Reorders freshly generated actions before they are expanded.
    /// Good orderings make alpha-beta cut earlier.
    fn order_actions(&self, _state: &Self::State, _actions: &mut Vec<Self::Action>) {}
}

/// Equality between states as the search understands it.
pub fn equal_state<S: PartialEq>(a: &S, b: &S) -> bool {
    a == b
}
