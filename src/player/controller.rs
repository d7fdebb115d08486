use crate::core::Problem;
use crate::error::SearchError;

/// プレイヤー操作のtrait
pub trait PlayerController<P: Problem> {
    /// Picks one of `legal_moves`. `Ok(None)` means the player has nothing
    /// to play (resignation).
    fn choose_move(
        &mut self,
        problem: &P,
        state: &P::State,
        legal_moves: &[P::Action],
    ) -> Result<Option<P::Action>, SearchError>;

    fn name(&self) -> &str;
}
