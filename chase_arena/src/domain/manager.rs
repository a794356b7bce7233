// Entity registry with queued membership changes.
//
// Membership only changes at two flush points inside `EntityManager::update`:
// registrations before the update pass, unregistrations after it. During the
// pass the live set is read-only, so entities can scan each other safely and
// anything killed this frame stays visible until the pass ends.

use crate::domain::entity::{Entity, EntityId, EntityKind, PlayerSeat};
use crate::domain::errors::EntityError;
use crate::domain::observer::{KillEvent, ObserverHandle, ObserverId};
use crate::domain::ports::{Binding, LoadedAsset};
use crate::domain::prototype::Spawner;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// Identity of one entity manager, carried by the player seat it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ManagerId(u64);

impl ManagerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Anything that accepts queued registry changes.
pub trait Registrar {
    /// Queues `entity`; returns its id for later reference.
    fn register(&mut self, entity: Entity) -> EntityId;
    /// Queues removal. Unknown ids are ignored at flush time.
    fn unregister(&mut self, id: EntityId);
}

/// The two pending queues, consumed once per update.
#[derive(Debug, Default)]
pub struct PendingChanges {
    to_register: Vec<Entity>,
    to_unregister: Vec<EntityId>,
}

impl PendingChanges {
    pub fn registrations(&self) -> &[Entity] {
        &self.to_register
    }

    pub fn unregistrations(&self) -> &[EntityId] {
        &self.to_unregister
    }
}

impl Registrar for PendingChanges {
    fn register(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.to_register.push(entity);
        id
    }

    fn unregister(&mut self, id: EntityId) {
        self.to_unregister.push(id);
    }
}

/// Read-only view of every registered entity, indexed by id and by kind.
/// Iteration is in ascending id order.
#[derive(Debug, Default)]
pub struct LiveEntities {
    all: BTreeMap<EntityId, Entity>,
    by_kind: HashMap<EntityKind, BTreeSet<EntityId>>,
}

impl LiveEntities {
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.all.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.all.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.all.values()
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|id| self.all.get(id))
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.by_kind.get(&kind).map_or(0, BTreeSet::len)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.all.get_mut(&id)
    }

    fn insert(&mut self, entity: Entity) {
        self.by_kind
            .entry(entity.kind())
            .or_default()
            .insert(entity.id());
        self.all.insert(entity.id(), entity);
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.all.remove(&id)?;
        if let Some(ids) = self.by_kind.get_mut(&entity.kind()) {
            ids.remove(&id);
        }
        Some(entity)
    }
}

type Predicate = Box<dyn Fn(&Entity) -> bool>;

struct Subscription {
    handle: ObserverHandle<KillEvent>,
    predicate: Predicate,
}

/// Owns every live entity of one game, plus the kill observers that should be
/// attached to matching entities as they arrive.
pub struct EntityManager {
    id: ManagerId,
    live: LiveEntities,
    pending: PendingChanges,
    observers: BTreeMap<ObserverId, Subscription>,
}

impl EntityManager {
    /// Creates an empty registry and the single player seat that goes with it.
    pub fn new() -> (Self, PlayerSeat) {
        let id = ManagerId::next();
        let manager = Self {
            id,
            live: LiveEntities::default(),
            pending: PendingChanges::default(),
            observers: BTreeMap::new(),
        };
        (manager, PlayerSeat::new(id))
    }

    /// Builds the player from this manager's seat and queues it.
    pub fn register_player(
        &mut self,
        seat: PlayerSeat,
        asset: LoadedAsset,
        speed: f32,
        binding: Rc<dyn Binding>,
        gun: Option<Spawner>,
    ) -> Result<EntityId, EntityError> {
        if seat.manager() != self.id {
            warn!("rejected player seat from another manager");
            return Err(EntityError::ForeignSeat);
        }
        Ok(self.register(Entity::player(asset, speed, binding, gun)))
    }

    /// Runs one cycle: flush registrations, update every live entity, flush
    /// unregistrations.
    pub fn update(&mut self) {
        self.perform_register();
        self.perform_update();
        self.perform_unregister();
    }

    /// Live entities of `kind`, or all of them when `kind` is `None`.
    pub fn get_entities(
        &self,
        kind: Option<EntityKind>,
    ) -> Box<dyn Iterator<Item = &Entity> + '_> {
        match kind {
            Some(kind) => Box::new(self.live.of_kind(kind)),
            None => Box::new(self.live.iter()),
        }
    }

    pub fn entities(&self) -> &LiveEntities {
        &self.live
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Subscribes `handle` to every live observable entity accepted by
    /// `predicate`, and to every matching entity registered later.
    pub fn register_observer(
        &mut self,
        handle: ObserverHandle<KillEvent>,
        predicate: impl Fn(&Entity) -> bool + 'static,
    ) {
        for entity in self.live.all.values_mut() {
            if entity.is_observable() && predicate(entity) {
                if let Some(observable) = entity.observable_mut() {
                    observable.add_observer(&handle);
                }
            }
        }
        debug!(observer_id = ?handle.id(), "observer registered");
        self.observers.insert(
            handle.id(),
            Subscription {
                handle,
                predicate: Box::new(predicate),
            },
        );
    }

    /// Detaches the observer from every live entity and forgets its predicate.
    pub fn unregister_observer(&mut self, id: ObserverId) {
        for entity in self.live.all.values_mut() {
            if let Some(observable) = entity.observable_mut() {
                observable.remove_observer(id);
            }
        }
        if self.observers.remove(&id).is_some() {
            debug!(observer_id = ?id, "observer unregistered");
        }
    }

    fn perform_register(&mut self) {
        let queued = std::mem::take(&mut self.pending.to_register);
        if queued.is_empty() {
            return;
        }
        debug!(count = queued.len(), "registering queued entities");

        for mut entity in queued {
            if entity.is_observable() {
                for subscription in self.observers.values() {
                    if !(subscription.predicate)(&entity) {
                        continue;
                    }
                    if let Some(observable) = entity.observable_mut() {
                        observable.add_observer(&subscription.handle);
                    }
                }
            }
            self.live.insert(entity);
        }
    }

    fn perform_update(&mut self) {
        let Self { live, pending, .. } = self;
        let ids: Vec<EntityId> = live.all.keys().copied().collect();
        for id in ids {
            update_entity(live, pending, id);
        }
    }

    fn perform_unregister(&mut self) {
        let queued = std::mem::take(&mut self.pending.to_unregister);
        for id in queued {
            match self.live.remove(id) {
                Some(entity) => trace!(entity_id = %id, kind = ?entity.kind(), "unregistered"),
                None => trace!(entity_id = %id, "unregister ignored for absent entity"),
            }
        }
    }
}

impl Registrar for EntityManager {
    fn register(&mut self, entity: Entity) -> EntityId {
        self.pending.register(entity)
    }

    fn unregister(&mut self, id: EntityId) {
        self.pending.unregister(id);
    }
}

/// One entity's frame: its commands, then its kill scan, then its flight.
fn update_entity(live: &mut LiveEntities, pending: &mut PendingChanges, id: EntityId) {
    let Some(entity) = live.get(id) else {
        return;
    };
    let commands = entity.decide(live);

    if let Some(entity) = live.get_mut(id) {
        entity.act(&commands, pending);
    }
    if let Some(entity) = live.get(id) {
        entity.hunt(live, pending);
    }
    if let Some(entity) = live.get_mut(id) {
        entity.fly(pending);
    }
}
