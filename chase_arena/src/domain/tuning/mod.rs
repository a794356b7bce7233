pub mod monster;
pub mod player;
pub mod projectile;

pub use monster::{MonsterTuning, SpawnEdge};
pub use player::PlayerTuning;
pub use projectile::ProjectileTuning;
