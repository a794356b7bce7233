// Template-based spawning: copy a held entity, patch a few fields, register it.

use crate::domain::entity::{Entity, EntityId, EntityKind};
use crate::domain::errors::EntityError;
use crate::domain::geometry::Vec2;
use crate::domain::manager::Registrar;
use tracing::trace;

/// An entity kept aside as a template. It is never registered itself.
#[derive(Debug)]
pub struct Prototype {
    template: Box<Entity>,
}

impl Prototype {
    /// Players cannot be templates; there is only ever one of them.
    pub fn new(template: Entity) -> Result<Self, EntityError> {
        if template.kind() == EntityKind::Player {
            return Err(EntityError::NotClonable(EntityKind::Player));
        }
        Ok(Self {
            template: Box::new(template),
        })
    }

    pub fn template(&self) -> &Entity {
        &self.template
    }

    /// New entity of the template's kind with a fresh id and no subscribers.
    /// The sprite is shared; every other field is an independent copy.
    pub fn copy(&self) -> Entity {
        self.template.duplicate()
    }
}

impl Clone for Prototype {
    fn clone(&self) -> Self {
        Self {
            template: Box::new(self.template.duplicate()),
        }
    }
}

/// Field patches applied to a fresh copy before it is registered.
///
/// Position fields apply in order `x`, `y`, then `center`. `direction` and
/// `lifetime` only affect entities that fly and are ignored otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    x: Option<f32>,
    y: Option<f32>,
    center: Option<Vec2>,
    speed: Option<f32>,
    direction: Option<Vec2>,
    lifetime: Option<i32>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn center(mut self, center: Vec2) -> Self {
        self.center = Some(center);
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn direction(mut self, direction: Vec2) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn lifetime(mut self, lifetime: i32) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn apply(&self, entity: &mut Entity) {
        if let Some(speed) = self.speed {
            entity.speed = speed;
        }
        if let Some(x) = self.x {
            entity.rect.x = x;
        }
        if let Some(y) = self.y {
            entity.rect.y = y;
        }
        if let Some(center) = self.center {
            entity.rect.set_center(center);
        }

        if self.direction.is_none() && self.lifetime.is_none() {
            return;
        }
        let Some(flight) = entity.flight.as_mut() else {
            trace!(entity_id = %entity.id(), "flight overrides ignored for non-flying entity");
            return;
        };
        if let Some(direction) = self.direction {
            flight.direction = direction;
        }
        if let Some(lifetime) = self.lifetime {
            flight.lifetime = lifetime;
        }
    }
}

/// Produces registered copies of one prototype.
#[derive(Debug, Clone)]
pub struct Spawner {
    prototype: Prototype,
}

impl Spawner {
    pub fn new(prototype: Prototype) -> Self {
        Self { prototype }
    }

    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Copies the template, applies `overrides`, then queues the copy for
    /// registration. The copy becomes live on the registrar's next flush.
    pub fn spawn<R>(&self, registrar: &mut R, overrides: Overrides) -> EntityId
    where
        R: Registrar + ?Sized,
    {
        let mut entity = self.prototype.copy();
        overrides.apply(&mut entity);
        trace!(entity_id = %entity.id(), kind = ?entity.kind(), "spawned from prototype");
        registrar.register(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::Strategy;
    use crate::domain::geometry::Rect;
    use crate::domain::manager::PendingChanges;
    use crate::domain::ports::LoadedAsset;
    use crate::domain::sprite::Sprite;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn asset(x: f32, y: f32, size: f32) -> LoadedAsset {
        LoadedAsset {
            sprite: Sprite::solid("proto", 2, 2, [100, 100, 100, 255]),
            rect: Rect::new(x, y, size, size),
        }
    }

    fn monster_prototype() -> Prototype {
        Prototype::new(Entity::monster(asset(0.0, 0.0, 10.0), 3.0, Strategy::ChasePlayer))
            .expect("monster is clonable")
    }

    #[test]
    fn when_template_is_a_player_then_prototype_is_rejected() {
        struct Idle;
        impl crate::domain::ports::Binding for Idle {
            fn get_commands(&self) -> Vec<crate::domain::command::Command> {
                Vec::new()
            }
        }
        let player = Entity::player(asset(0.0, 0.0, 10.0), 5.0, Rc::new(Idle), None);

        let result = Prototype::new(player);

        assert!(matches!(
            result,
            Err(EntityError::NotClonable(EntityKind::Player))
        ));
    }

    #[test]
    fn when_copy_rect_is_mutated_then_template_rect_is_unchanged() {
        let prototype = monster_prototype();
        let mut copy = prototype.copy();

        copy.rect.x = 99.0;
        copy.rect.resize(1.0, 1.0);

        assert_eq!(prototype.template().rect, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn when_copy_sprite_is_mutated_then_template_sprite_changes_too() {
        let prototype = monster_prototype();
        let copy = prototype.copy();

        copy.sprite.tint([0, 0, 0, 255]);

        let template_pixel = prototype.template().sprite.pixels().get_pixel(0, 0).0;
        assert_eq!(template_pixel, [0, 0, 0, 255]);
    }

    #[test]
    fn when_spawning_repeatedly_then_every_id_is_fresh() {
        let spawner = Spawner::new(monster_prototype());
        let mut pending = PendingChanges::default();

        let ids: Vec<EntityId> = (0..5)
            .map(|_| spawner.spawn(&mut pending, Overrides::new()))
            .collect();

        let unique: HashSet<EntityId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(!unique.contains(&spawner.prototype().template().id()));
    }

    #[test]
    fn when_overrides_given_then_they_apply_before_registration() {
        let bullet = Entity::projectile(asset(0.0, 0.0, 4.0), 30.0, Vec2::ZERO, 60);
        let spawner = Spawner::new(Prototype::new(bullet).expect("projectile is clonable"));
        let mut pending = PendingChanges::default();

        spawner.spawn(
            &mut pending,
            Overrides::new()
                .center(Vec2::new(50.0, 60.0))
                .direction(Vec2::new(1.0, 0.0))
                .lifetime(3)
                .speed(12.0),
        );

        let spawned = &pending.registrations()[0];
        assert_eq!(spawned.center(), Vec2::new(50.0, 60.0));
        assert_eq!(spawned.speed, 12.0);
        let flight = spawned.flight.as_ref().expect("projectile flies");
        assert_eq!(flight.direction, Vec2::new(1.0, 0.0));
        assert_eq!(flight.lifetime, 3);
    }

    #[test]
    fn when_flight_overrides_target_a_walker_then_only_position_applies() {
        let spawner = Spawner::new(monster_prototype());
        let mut pending = PendingChanges::default();

        spawner.spawn(&mut pending, Overrides::new().y(40.0).direction(Vec2::new(1.0, 1.0)));

        let spawned = &pending.registrations()[0];
        assert_eq!(spawned.y(), 40.0);
        assert!(spawned.flight.is_none());
    }
}
