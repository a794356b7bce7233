// JSON frame snapshots written to stdout when JSON rendering is enabled.

use crate::domain::{Entity, EntityKind};
use crate::use_cases::Game;
use serde::Serialize;

/// Everything a viewer needs to redraw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshotDto {
    pub frame: u64,
    pub kills: u32,
    pub game_over: bool,
    pub entities: Vec<EntityStateDto>,
}

impl From<&Game> for FrameSnapshotDto {
    fn from(game: &Game) -> Self {
        let info = game.info();
        Self {
            frame: game.frame(),
            kills: info.kills,
            game_over: info.game_over,
            entities: game.entities().iter().map(EntityStateDto::from).collect(),
        }
    }
}

/// Flattened entity state for one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EntityStateDto {
    pub id: u64,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Entity> for EntityStateDto {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id().get(),
            kind: entity.kind(),
            x: entity.rect.x,
            y: entity.rect.y,
            width: entity.rect.width(),
            height: entity.rect.height(),
        }
    }
}
