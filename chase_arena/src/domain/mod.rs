// Domain layer: entity lifecycle, spawning and kill notification. No I/O.

pub mod ai;
pub mod command;
pub mod entity;
pub mod errors;
pub mod geometry;
pub mod manager;
pub mod observer;
pub mod ports;
pub mod prototype;
pub mod sprite;
pub mod state;
pub mod tuning;

pub use ai::Strategy;
pub use command::Command;
pub use entity::{Control, Entity, EntityId, EntityKind, Flight, KillCapability, PlayerSeat};
pub use errors::{AssetError, EntityError};
pub use geometry::{Rect, Vec2};
pub use manager::{EntityManager, LiveEntities, PendingChanges, Registrar};
pub use observer::{EntityTag, KillEvent, Observable, Observer, ObserverHandle, ObserverId};
pub use ports::{AssetLoader, Binding, LoadedAsset, Renderer};
pub use prototype::{Overrides, Prototype, Spawner};
pub use sprite::Sprite;
pub use state::GameInfo;
