// Game-wide score state shared between kill observers and rendering.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub game_over: bool,
    pub kills: u32,
}
