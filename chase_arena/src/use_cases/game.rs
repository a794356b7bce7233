// The game world: one entity manager, the monster spawners and the score.

use super::scoring::{MonsterKilledObserver, PlayerKilledObserver};
use super::types::{GameSettings, GameSetupError};
use crate::domain::tuning::{MonsterTuning, PlayerTuning, ProjectileTuning, SpawnEdge};
use crate::domain::{
    AssetLoader, Binding, Entity, EntityId, EntityManager, GameInfo, LiveEntities, ObserverHandle,
    Overrides, Prototype, Renderer, Spawner, Strategy, Vec2,
};
use rand::Rng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

pub struct Game {
    manager: EntityManager,
    monster_spawners: Vec<Spawner>,
    info: Rc<RefCell<GameInfo>>,
    player_id: EntityId,
    settings: GameSettings,
    rng: StdRng,
    frame: u64,
}

impl Game {
    /// Loads the art, builds the templates and queues the player.
    ///
    /// The player becomes live on the first `step`.
    pub fn new(
        settings: GameSettings,
        assets: &dyn AssetLoader,
        binding: Rc<dyn Binding>,
        rng: StdRng,
    ) -> Result<Self, GameSetupError> {
        let (mut manager, seat) = EntityManager::new();
        let width = settings.screen_width as f32;
        let height = settings.screen_height as f32;

        let projectile = ProjectileTuning::default();
        let bullet = Entity::projectile(
            assets.load(
                Vec2::ZERO,
                projectile.width,
                projectile.height,
                projectile.sprite_path,
            )?,
            projectile.speed,
            Vec2::ZERO,
            projectile.lifetime,
        );
        let gun = Spawner::new(Prototype::new(bullet)?);

        let player = PlayerTuning::default();
        let player_id = manager.register_player(
            seat,
            assets.load(
                Vec2::new(width / 2.0, height / 2.0),
                player.width,
                player.height,
                player.sprite_path,
            )?,
            player.speed,
            binding,
            Some(gun),
        )?;

        let mut monster_spawners = Vec::new();
        for tuning in MonsterTuning::roster() {
            let x = match tuning.edge {
                SpawnEdge::Left => 0.0,
                SpawnEdge::Right => width,
            };
            let asset = assets.load(
                Vec2::new(x, 0.0),
                tuning.width,
                tuning.height,
                tuning.sprite_path,
            )?;
            let template = Entity::monster(asset, tuning.speed, Strategy::ChasePlayer);
            monster_spawners.push(Spawner::new(Prototype::new(template)?));
        }

        let info = Rc::new(RefCell::new(GameInfo::default()));
        manager.register_observer(
            ObserverHandle::new(PlayerKilledObserver::new(player_id, Rc::clone(&info))),
            |_| true,
        );
        manager.register_observer(
            ObserverHandle::new(MonsterKilledObserver::new(Rc::clone(&info))),
            |_| true,
        );

        info!(
            screen_width = settings.screen_width,
            screen_height = settings.screen_height,
            spawners = monster_spawners.len(),
            "game world ready"
        );

        Ok(Self {
            manager,
            monster_spawners,
            info,
            player_id,
            settings,
            rng,
            frame: 0,
        })
    }

    /// One simulation frame: maybe spawn a monster wave, then update the world.
    pub fn step(&mut self) {
        self.frame += 1;

        let roll = self.rng.gen_range(0..=100);
        if !self.info.borrow().game_over && roll < self.settings.spawn_chance_percent {
            self.spawn_wave();
        }

        self.manager.update();
    }

    /// Spawns one monster per template on a random row.
    pub fn spawn_wave(&mut self) {
        for spawner in &self.monster_spawners {
            let row = self.rng.gen_range(0..=self.settings.screen_height) as f32;
            spawner.spawn(&mut self.manager, Overrides::new().y(row));
        }
        debug!(frame = self.frame, count = self.monster_spawners.len(), "monster wave spawned");
    }

    /// Draws every live entity, then the score overlay.
    pub fn render<R: Renderer>(&self, renderer: &mut R, surface: &mut R::Surface) {
        for entity in self.manager.get_entities(None) {
            renderer.render_entity(entity, surface);
        }
        renderer.render_game_info(&self.info(), surface);
    }

    pub fn info(&self) -> GameInfo {
        *self.info.borrow()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn entities(&self) -> &LiveEntities {
        self.manager.entities()
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }
}
