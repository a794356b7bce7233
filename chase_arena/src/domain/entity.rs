// Simulation entities built from optional capabilities instead of subclasses.
//
// Every entity has a body (rect + speed) and a sprite. On top of that:
// - `Control` decides which commands run each frame (AI strategy or player input).
// - `KillCapability` scans target kinds and reports kills to its observers.
// - `Flight` moves the entity along a fixed direction until its lifetime runs out.
// - `gun` is a spawner used by `Command::ShootAtCursor`.

use crate::domain::ai::Strategy;
use crate::domain::command::Command;
use crate::domain::geometry::{Rect, Vec2, in_proximity};
use crate::domain::manager::{LiveEntities, ManagerId, Registrar};
use crate::domain::observer::{EntityTag, KillEvent, Observable};
use crate::domain::ports::{Binding, LoadedAsset};
use crate::domain::prototype::Spawner;
use crate::domain::sprite::Sprite;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, trace};

/// Process-unique entity identifier.
///
/// Ids are handed out in construction order, so ordering by id is ordering by
/// creation. Registries iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concrete entity kinds; the registry keeps a secondary index per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntityKind {
    /// Inert drawable with no behaviour.
    Prop,
    Player,
    Monster,
    Projectile,
}

/// Proof that the player slot of one entity manager is still free.
///
/// `EntityManager::new` returns exactly one seat, bound to that manager, and
/// `EntityManager::register_player` consumes it. A seat from another manager
/// is rejected, so a manager never holds more than one player.
#[derive(Debug)]
pub struct PlayerSeat {
    manager: ManagerId,
}

impl PlayerSeat {
    pub(crate) fn new(manager: ManagerId) -> Self {
        Self { manager }
    }

    pub(crate) fn manager(&self) -> ManagerId {
        self.manager
    }
}

/// Source of the commands an entity runs on itself each frame.
#[derive(Clone)]
pub enum Control {
    Ai(Strategy),
    Input(Rc<dyn Binding>),
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Ai(strategy) => f.debug_tuple("Ai").field(strategy).finish(),
            Control::Input(_) => f.write_str("Input"),
        }
    }
}

/// Kinds this entity kills on contact, plus whoever wants to hear about it.
#[derive(Debug)]
pub struct KillCapability {
    targets: Vec<EntityKind>,
    observers: Observable<KillEvent>,
}

impl KillCapability {
    pub fn new(targets: Vec<EntityKind>) -> Self {
        Self {
            targets,
            observers: Observable::new(),
        }
    }

    pub fn targets(&self) -> &[EntityKind] {
        &self.targets
    }

    pub fn observers(&self) -> &Observable<KillEvent> {
        &self.observers
    }

    /// Same targets, no subscribers.
    fn fresh_copy(&self) -> Self {
        Self::new(self.targets.clone())
    }
}

/// Straight-line motion with a frame countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Unit (or zero) direction, scaled by the entity's speed each frame.
    pub direction: Vec2,
    /// Frames left; at `<= 0` the entity removes itself.
    pub lifetime: i32,
}

#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    pub rect: Rect,
    /// Pixels per frame.
    pub speed: f32,
    pub sprite: Sprite,
    control: Option<Control>,
    killer: Option<KillCapability>,
    pub flight: Option<Flight>,
    pub gun: Option<Spawner>,
}

impl Entity {
    fn bare(kind: EntityKind, asset: LoadedAsset, speed: f32) -> Self {
        Self {
            id: EntityId::next(),
            kind,
            rect: asset.rect,
            speed,
            sprite: asset.sprite,
            control: None,
            killer: None,
            flight: None,
            gun: None,
        }
    }

    pub fn prop(asset: LoadedAsset, speed: f32) -> Self {
        Self::bare(EntityKind::Prop, asset, speed)
    }

    /// Only reachable through `EntityManager::register_player`.
    pub(crate) fn player(
        asset: LoadedAsset,
        speed: f32,
        binding: Rc<dyn Binding>,
        gun: Option<Spawner>,
    ) -> Self {
        let mut entity = Self::bare(EntityKind::Player, asset, speed);
        entity.control = Some(Control::Input(binding));
        entity.gun = gun;
        entity
    }

    /// AI-driven killer of players.
    pub fn monster(asset: LoadedAsset, speed: f32, strategy: Strategy) -> Self {
        let mut entity = Self::bare(EntityKind::Monster, asset, speed);
        entity.control = Some(Control::Ai(strategy));
        entity.killer = Some(KillCapability::new(vec![EntityKind::Player]));
        entity
    }

    /// Killer of monsters that flies along `direction` for `lifetime` frames.
    pub fn projectile(asset: LoadedAsset, speed: f32, direction: Vec2, lifetime: i32) -> Self {
        let mut entity = Self::bare(EntityKind::Projectile, asset, speed);
        entity.killer = Some(KillCapability::new(vec![EntityKind::Monster]));
        entity.flight = Some(Flight {
            direction,
            lifetime,
        });
        entity
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn tag(&self) -> EntityTag {
        EntityTag {
            id: self.id,
            kind: self.kind,
        }
    }

    pub fn x(&self) -> f32 {
        self.rect.x
    }

    pub fn y(&self) -> f32 {
        self.rect.y
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn control(&self) -> Option<&Control> {
        self.control.as_ref()
    }

    pub fn killer(&self) -> Option<&KillCapability> {
        self.killer.as_ref()
    }

    pub fn is_observable(&self) -> bool {
        self.killer.is_some()
    }

    pub(crate) fn observable_mut(&mut self) -> Option<&mut Observable<KillEvent>> {
        self.killer.as_mut().map(|killer| &mut killer.observers)
    }

    /// Typed copy for prototypes.
    ///
    /// The id and the kill subscribers are never copied: the copy gets a new
    /// id and an empty subscriber set. The sprite is shared with the source.
    /// Everything else is an independent value.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: EntityId::next(),
            kind: self.kind,
            rect: self.rect,
            speed: self.speed,
            sprite: self.sprite.clone(),
            control: self.control.clone(),
            killer: self.killer.as_ref().map(KillCapability::fresh_copy),
            flight: self.flight.clone(),
            gun: self.gun.clone(),
        }
    }

    pub(crate) fn decide(&self, live: &LiveEntities) -> Vec<Command> {
        match &self.control {
            Some(Control::Ai(strategy)) => strategy.get_commands(self, live),
            Some(Control::Input(binding)) => binding.get_commands(),
            None => Vec::new(),
        }
    }

    pub(crate) fn act(&mut self, commands: &[Command], registrar: &mut dyn Registrar) {
        for command in commands {
            command.execute(self, registrar);
        }
    }

    /// Queues every target in range for removal and reports each kill.
    /// Targets stay live until the manager flushes its unregister queue.
    pub(crate) fn hunt(&self, live: &LiveEntities, registrar: &mut dyn Registrar) {
        let Some(killer) = &self.killer else {
            return;
        };

        for kind in &killer.targets {
            for target in live.of_kind(*kind) {
                if target.id == self.id || !in_proximity(&self.rect, &target.rect) {
                    continue;
                }

                registrar.unregister(target.id);
                info!(
                    killer_id = %self.id,
                    killer_kind = ?self.kind,
                    killed_id = %target.id,
                    killed_kind = ?target.kind,
                    "entity killed"
                );
                killer.observers.notify(&KillEvent {
                    killer: self.tag(),
                    killed: target.tag(),
                });
            }
        }
    }

    /// Moves along the flight path, expiring once the lifetime is spent.
    pub(crate) fn fly(&mut self, registrar: &mut dyn Registrar) {
        let Some(flight) = &mut self.flight else {
            return;
        };

        self.rect.x += self.speed * flight.direction.x;
        self.rect.y += self.speed * flight.direction.y;

        // Checked before this frame's decrement.
        if flight.lifetime <= 0 {
            trace!(entity_id = %self.id, "flight expired");
            registrar.unregister(self.id);
        }
        flight.lifetime -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manager::PendingChanges;

    fn asset(x: f32, y: f32, size: f32) -> LoadedAsset {
        LoadedAsset {
            sprite: Sprite::solid("test", 1, 1, [255, 255, 255, 255]),
            rect: Rect::new(x, y, size, size),
        }
    }

    #[test]
    fn when_entities_are_built_then_ids_are_unique_and_increasing() {
        let first = Entity::prop(asset(0.0, 0.0, 1.0), 1.0);
        let second = Entity::prop(asset(0.0, 0.0, 1.0), 1.0);
        assert!(first.id() < second.id());
    }

    #[test]
    fn when_monster_is_built_then_it_targets_players() {
        let monster = Entity::monster(asset(0.0, 0.0, 10.0), 3.0, Strategy::ChasePlayer);
        let killer = monster.killer().expect("monster should kill");
        assert_eq!(killer.targets(), &[EntityKind::Player]);
        assert!(monster.is_observable());
        assert!(matches!(monster.control(), Some(Control::Ai(Strategy::ChasePlayer))));
    }

    #[test]
    fn when_projectile_flies_then_it_moves_by_speed_times_direction() {
        let mut projectile =
            Entity::projectile(asset(0.0, 0.0, 4.0), 10.0, Vec2::new(0.6, -0.8), 5);
        let mut pending = PendingChanges::default();

        projectile.fly(&mut pending);

        assert!((projectile.x() - 6.0).abs() < 1e-5);
        assert!((projectile.y() + 8.0).abs() < 1e-5);
        assert_eq!(projectile.flight.as_ref().map(|f| f.lifetime), Some(4));
        assert!(pending.unregistrations().is_empty());
    }

    #[test]
    fn when_lifetime_is_zero_then_fly_queues_self_removal_before_decrement() {
        let mut projectile = Entity::projectile(asset(0.0, 0.0, 4.0), 1.0, Vec2::ZERO, 0);
        let mut pending = PendingChanges::default();

        projectile.fly(&mut pending);

        assert_eq!(pending.unregistrations(), &[projectile.id()]);
        assert_eq!(projectile.flight.as_ref().map(|f| f.lifetime), Some(-1));
    }

    #[test]
    fn when_duplicated_then_id_and_subscribers_are_fresh() {
        let monster = Entity::monster(asset(5.0, 5.0, 10.0), 3.0, Strategy::ChasePlayer);
        let copy = monster.duplicate();

        assert_ne!(copy.id(), monster.id());
        assert_eq!(copy.kind(), EntityKind::Monster);
        assert_eq!(copy.rect, monster.rect);
        assert!(copy.sprite.shares_pixels_with(&monster.sprite));
        assert!(copy.killer().is_some_and(|k| k.observers().is_empty()));
    }
}
