// Framework bootstrap: tracing setup and the tokio game loop.

use crate::frameworks::config;
use crate::interface_adapters::assets::{FallbackAssetLoader, ImageAssetLoader};
use crate::interface_adapters::input::{
    DeviceState, InputEvent, KeyboardMouseBinding, read_stdin_events,
};
use crate::interface_adapters::protocol::FrameSnapshotDto;
use crate::interface_adapters::render::{CanvasRenderer, Frame};
use crate::use_cases::{Game, GameSettings};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::io::{Result, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Everything `run` needs that would otherwise come from the environment.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub settings: GameSettings,
    pub tick_interval: Duration,
    pub assets_dir: PathBuf,
    /// Write one JSON snapshot line per frame to stdout.
    pub render_json: bool,
    pub seed: Option<u64>,
}

impl RuntimeOptions {
    pub fn from_env() -> Self {
        Self {
            settings: GameSettings {
                screen_width: config::screen_width(),
                screen_height: config::screen_height(),
                spawn_chance_percent: config::spawn_chance_percent(),
            },
            tick_interval: config::TICK_INTERVAL,
            assets_dir: config::assets_dir(),
            render_json: config::render_json(),
            seed: config::rng_seed(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub kills: u32,
    pub game_over: bool,
}

/// Runs the game loop until a `Quit` event arrives or ctrl-c is pressed.
///
/// Input events are drained at the start of every frame; a frame is never
/// interrupted once its update has begun.
pub async fn run(
    options: RuntimeOptions,
    mut input_rx: mpsc::Receiver<InputEvent>,
) -> Result<RunSummary> {
    let loader = FallbackAssetLoader::new(ImageAssetLoader::new(&options.assets_dir));
    let device = Rc::new(RefCell::new(DeviceState::default()));
    let binding = Rc::new(KeyboardMouseBinding::new(Rc::clone(&device)));
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(options.settings, &loader, binding, rng)
        .map_err(std::io::Error::other)
        .inspect_err(|e| tracing::error!(error = %e, "failed to build game"))?;

    let mut renderer = CanvasRenderer;
    let mut frame = Frame::new(options.settings.screen_width, options.settings.screen_height);
    let mut stdout = std::io::stdout();

    let mut interval = tokio::time::interval(options.tick_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        tick_interval_ms = options.tick_interval.as_millis(),
        render_json = options.render_json,
        "game loop started"
    );

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("ctrl-c received");
                break;
            }
            _ = interval.tick() => {
                if drain_input(&mut input_rx, &device) {
                    break;
                }

                game.step();

                // Headless render pass: the frame is drawn every tick but never displayed.
                frame.clear();
                game.render(&mut renderer, &mut frame);

                if options.render_json {
                    let snapshot = FrameSnapshotDto::from(&game);
                    serde_json::to_writer(&mut stdout, &snapshot)?;
                    writeln!(stdout)?;
                }
            }
        }
    }

    let info = game.info();
    let summary = RunSummary {
        frames: game.frame(),
        kills: info.kills,
        game_over: info.game_over,
    };
    info!(frames = summary.frames, "game loop stopped");
    Ok(summary)
}

/// Applies queued device events. Returns true once a quit was requested.
fn drain_input(input_rx: &mut mpsc::Receiver<InputEvent>, device: &RefCell<DeviceState>) -> bool {
    loop {
        match input_rx.try_recv() {
            Ok(InputEvent::Quit) => {
                info!("quit requested");
                return true;
            }
            Ok(event) => device.borrow_mut().apply(event),
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                debug!("input channel closed");
                return false;
            }
        }
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let options = RuntimeOptions::from_env();
    debug!(?options, "runtime options loaded");

    let (input_tx, input_rx) = mpsc::channel(config::INPUT_CHANNEL_CAPACITY);
    tokio::spawn(read_stdin_events(input_tx));

    let summary = run(options, input_rx)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "game loop failed"))?;

    info!(
        frames = summary.frames,
        kills = summary.kills,
        game_over = summary.game_over,
        "run finished"
    );
    Ok(())
}
