// Gameplay tuning for the player.
//
// Keep this separate from runtime configuration (tick rate, screen size, etc.).

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Sprite width and height in pixels.
    pub width: u32,
    pub height: u32,

    /// Movement per frame in pixels.
    pub speed: f32,

    /// Sprite file, relative to the assets directory.
    pub sprite_path: &'static str,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            speed: 5.0,
            sprite_path: "protagonist.png",
        }
    }
}
