// Gameplay tuning for projectiles fired by the player.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Sprite width and height in pixels.
    pub width: u32,
    pub height: u32,

    /// Movement per frame in pixels.
    pub speed: f32,

    /// Frames before the projectile removes itself.
    pub lifetime: i32,

    pub sprite_path: &'static str,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            speed: 30.0,
            lifetime: 60,
            sprite_path: "plasma_ball.png",
        }
    }
}
