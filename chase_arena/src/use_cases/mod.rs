// Use cases layer: the game world and its scoring rules.

pub mod game;
pub mod scoring;
pub mod types;

pub use game::Game;
pub use scoring::{MonsterKilledObserver, PlayerKilledObserver};
pub use types::{GameSettings, GameSetupError};
