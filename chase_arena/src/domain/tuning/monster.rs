// Gameplay tuning for the monster templates.

/// Screen edge a monster template starts on; the row is picked per spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct MonsterTuning {
    /// Sprite width and height in pixels.
    pub width: u32,
    pub height: u32,

    /// Movement per frame in pixels.
    pub speed: f32,

    pub edge: SpawnEdge,

    pub sprite_path: &'static str,
}

impl MonsterTuning {
    /// Small, slow chaser entering from the left.
    pub fn grunt() -> Self {
        Self {
            width: 100,
            height: 100,
            speed: 3.0,
            edge: SpawnEdge::Left,
            sprite_path: "monster.png",
        }
    }

    /// Large, fast chaser entering from the right.
    pub fn brute() -> Self {
        Self {
            width: 150,
            height: 150,
            speed: 5.0,
            edge: SpawnEdge::Right,
            sprite_path: "monster.png",
        }
    }

    /// Both templates, in spawn order.
    pub fn roster() -> Vec<Self> {
        vec![Self::grunt(), Self::brute()]
    }
}
