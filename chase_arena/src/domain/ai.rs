// AI strategies for non-player entities.

use crate::domain::command::Command;
use crate::domain::entity::{Entity, EntityKind};
use crate::domain::manager::LiveEntities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Step toward the player along the axis with the larger gap.
    ChasePlayer,
}

impl Strategy {
    pub fn get_commands(&self, me: &Entity, live: &LiveEntities) -> Vec<Command> {
        match self {
            Strategy::ChasePlayer => chase_player(me, live),
        }
    }
}

fn chase_player(me: &Entity, live: &LiveEntities) -> Vec<Command> {
    // First player in id order, i.e. the earliest constructed.
    let Some(player) = live.of_kind(EntityKind::Player).next() else {
        return vec![Command::DoNothing];
    };

    let dx = player.x() - me.x();
    let dy = player.y() - me.y();

    let command = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Command::MoveRight
        } else {
            Command::MoveLeft
        }
    } else if dy > 0.0 {
        Command::MoveDown
    } else {
        Command::MoveUp
    };
    vec![command]
}
