pub mod controller;
pub mod random;
pub mod search;

pub use controller::PlayerController;
pub use random::RandomPlayer;
pub use search::SearchPlayer;
