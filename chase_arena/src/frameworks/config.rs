use std::{env, path::PathBuf, time::Duration};

// Runtime constants and environment-driven settings (not gameplay tuning).

pub fn screen_width() -> u32 {
    env::var("SCREEN_WIDTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1600)
}

pub fn screen_height() -> u32 {
    env::var("SCREEN_HEIGHT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(900)
}

pub fn spawn_chance_percent() -> u32 {
    env::var("SPAWN_CHANCE_PERCENT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
}

pub fn assets_dir() -> PathBuf {
    env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

// None seeds from OS entropy.
pub fn rng_seed() -> Option<u64> {
    env::var("GAME_SEED").ok().and_then(|v| v.parse().ok())
}

pub fn render_json() -> bool {
    matches!(env::var("RENDER_FORMAT").as_deref(), Ok("json"))
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
