use crate::domain::command::Command;
use crate::domain::entity::Entity;
use crate::domain::errors::AssetError;
use crate::domain::geometry::{Rect, Vec2};
use crate::domain::sprite::Sprite;
use crate::domain::state::GameInfo;

// Port for turning raw device state into player commands, polled once per frame.
pub trait Binding {
    fn get_commands(&self) -> Vec<Command>;
}

// Port for drawing a frame after the update pass.
pub trait Renderer {
    type Surface;

    fn render_entity(&mut self, entity: &Entity, surface: &mut Self::Surface);
    fn render_game_info(&mut self, info: &GameInfo, surface: &mut Self::Surface);
}

// Sprite and bounding box produced by an asset loader.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub sprite: Sprite,
    pub rect: Rect,
}

// Port for loading art at construction time. The rect is centered on `position`.
pub trait AssetLoader {
    fn load(
        &self,
        position: Vec2,
        width: u32,
        height: u32,
        path: &str,
    ) -> Result<LoadedAsset, AssetError>;
}
