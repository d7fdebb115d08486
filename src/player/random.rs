use crate::core::Problem;
use crate::error::SearchError;
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    pub name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: &str, seed: u64) -> Self {
        RandomPlayer {
            name: name.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<P: Problem> PlayerController<P> for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &mut self,
        _problem: &P,
        _state: &P::State,
        legal_moves: &[P::Action],
    ) -> Result<Option<P::Action>, SearchError> {
        Ok(legal_moves.choose(&mut self.rng).cloned())
    }
}
