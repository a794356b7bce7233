// Kill observers that keep the shared game info up to date.

use crate::domain::{EntityId, EntityKind, GameInfo, KillEvent, Observer};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Ends the game when the given player is killed.
pub struct PlayerKilledObserver {
    player_id: EntityId,
    info: Rc<RefCell<GameInfo>>,
}

impl PlayerKilledObserver {
    pub fn new(player_id: EntityId, info: Rc<RefCell<GameInfo>>) -> Self {
        Self { player_id, info }
    }
}

impl Observer<KillEvent> for PlayerKilledObserver {
    fn on_notify(&self, event: &KillEvent) {
        if event.killed.id != self.player_id {
            return;
        }
        let mut info = self.info.borrow_mut();
        if !info.game_over {
            info!(killer_id = %event.killer.id, kills = info.kills, "player killed, game over");
        }
        info.game_over = true;
    }
}

/// Counts every monster kill.
pub struct MonsterKilledObserver {
    info: Rc<RefCell<GameInfo>>,
}

impl MonsterKilledObserver {
    pub fn new(info: Rc<RefCell<GameInfo>>) -> Self {
        Self { info }
    }
}

impl Observer<KillEvent> for MonsterKilledObserver {
    fn on_notify(&self, event: &KillEvent) {
        if event.killed.kind == EntityKind::Monster {
            self.info.borrow_mut().kills += 1;
        }
    }
}
