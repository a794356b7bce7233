// Use-case level settings and errors for building a game.

use crate::domain::{AssetError, EntityError};
use std::fmt;

/// World parameters that are not per-entity tuning.
#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Chance, in percent per frame, that every monster spawner fires once.
    pub spawn_chance_percent: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            screen_width: 1600,
            screen_height: 900,
            spawn_chance_percent: 5,
        }
    }
}

/// Errors returned while assembling the initial world.
#[derive(Debug)]
pub enum GameSetupError {
    Asset(AssetError),
    Entity(EntityError),
}

impl fmt::Display for GameSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameSetupError::Asset(e) => write!(f, "asset setup failed: {e}"),
            GameSetupError::Entity(e) => write!(f, "entity setup failed: {e}"),
        }
    }
}

impl std::error::Error for GameSetupError {}

impl From<AssetError> for GameSetupError {
    fn from(e: AssetError) -> Self {
        GameSetupError::Asset(e)
    }
}

impl From<EntityError> for GameSetupError {
    fn from(e: EntityError) -> Self {
        GameSetupError::Entity(e)
    }
}
