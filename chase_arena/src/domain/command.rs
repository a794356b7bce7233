// Commands: independent mutations an entity applies to itself.

use crate::domain::entity::Entity;
use crate::domain::geometry::Vec2;
use crate::domain::manager::Registrar;
use crate::domain::prototype::Overrides;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    DoNothing,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Fire the entity's gun from its center toward `target`.
    ShootAtCursor { target: Vec2 },
}

impl Command {
    pub fn shoot_at(target: Vec2) -> Self {
        Command::ShootAtCursor { target }
    }

    /// Applies the command to `entity`. Spawned objects go through `registrar`.
    pub fn execute(&self, entity: &mut Entity, registrar: &mut dyn Registrar) {
        match *self {
            Command::DoNothing => {}
            Command::MoveUp => entity.rect.y -= entity.speed,
            Command::MoveDown => entity.rect.y += entity.speed,
            Command::MoveLeft => entity.rect.x -= entity.speed,
            Command::MoveRight => entity.rect.x += entity.speed,
            Command::ShootAtCursor { target } => shoot(entity, target, registrar),
        }
    }
}

fn shoot(entity: &Entity, target: Vec2, registrar: &mut dyn Registrar) {
    let Some(gun) = &entity.gun else {
        return;
    };

    let center = entity.center();
    let dx = target.x - center.x;
    let dy = target.y - center.y;
    let mut distance = (dx * dx + dy * dy).sqrt();
    // Target on the center: keep a zero direction instead of dividing by zero.
    if distance == 0.0 {
        distance = 1.0;
    }

    gun.spawn(
        registrar,
        Overrides::new()
            .center(center)
            .direction(Vec2::new(dx / distance, dy / distance)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;
    use crate::domain::manager::PendingChanges;
    use crate::domain::ports::LoadedAsset;
    use crate::domain::prototype::{Prototype, Spawner};
    use crate::domain::sprite::Sprite;

    fn asset(x: f32, y: f32, size: f32) -> LoadedAsset {
        LoadedAsset {
            sprite: Sprite::solid("test", 1, 1, [0, 0, 0, 255]),
            rect: Rect::new(x, y, size, size),
        }
    }

    fn armed_prop() -> Entity {
        let bullet = Entity::projectile(asset(0.0, 0.0, 2.0), 30.0, Vec2::ZERO, 60);
        let gun = Spawner::new(Prototype::new(bullet).expect("projectile is clonable"));
        let mut shooter = Entity::prop(asset(0.0, 0.0, 10.0), 5.0);
        shooter.gun = Some(gun);
        shooter
    }

    #[test]
    fn when_move_commands_execute_then_position_changes_by_speed() {
        let mut entity = Entity::prop(asset(10.0, 10.0, 4.0), 2.5);
        let mut pending = PendingChanges::default();

        for command in [
            Command::MoveUp,
            Command::MoveRight,
            Command::MoveRight,
            Command::DoNothing,
        ] {
            command.execute(&mut entity, &mut pending);
        }

        assert_eq!(entity.x(), 15.0);
        assert_eq!(entity.y(), 7.5);

        Command::MoveDown.execute(&mut entity, &mut pending);
        Command::MoveLeft.execute(&mut entity, &mut pending);
        assert_eq!((entity.x(), entity.y()), (12.5, 10.0));
    }

    #[test]
    fn when_shooter_has_no_gun_then_shoot_is_a_no_op() {
        let mut entity = Entity::prop(asset(0.0, 0.0, 4.0), 1.0);
        let mut pending = PendingChanges::default();

        Command::shoot_at(Vec2::new(100.0, 0.0)).execute(&mut entity, &mut pending);

        assert!(pending.registrations().is_empty());
    }

    #[test]
    fn when_shooting_then_projectile_starts_at_center_with_unit_direction() {
        let mut shooter = armed_prop();
        let mut pending = PendingChanges::default();

        // Shooter center is (5, 5); target is 3-4-5 away.
        Command::shoot_at(Vec2::new(8.0, 9.0)).execute(&mut shooter, &mut pending);

        let [projectile] = pending.registrations() else {
            panic!("expected exactly one spawned projectile");
        };
        assert_eq!(projectile.center(), Vec2::new(5.0, 5.0));
        let direction = projectile.flight.as_ref().map(|f| f.direction);
        assert_eq!(direction, Some(Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn when_target_is_the_center_then_direction_is_zero() {
        let mut shooter = armed_prop();
        let mut pending = PendingChanges::default();

        Command::shoot_at(Vec2::new(5.0, 5.0)).execute(&mut shooter, &mut pending);

        let direction = pending.registrations()[0].flight.as_ref().map(|f| f.direction);
        assert_eq!(direction, Some(Vec2::ZERO));
    }
}
