// Input adapter: raw device events in, player commands out.
//
// Device events arrive over an mpsc channel. The shipped producer reads one
// event per stdin line:
//   down <key> | up <key> | move <x> <y> | click [left|right|middle] | quit

use crate::domain::{Binding, Command, Vec2};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
}

impl Key {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    CursorMoved(Vec2),
    MouseDown(MouseButton),
    Quit,
}

impl InputEvent {
    /// Parses one line of the text input format. Returns `None` for anything
    /// unrecognised, including blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let event = match verb.as_str() {
            "down" => InputEvent::KeyDown(Key::parse(words.next()?)?),
            "up" => InputEvent::KeyUp(Key::parse(words.next()?)?),
            "move" => {
                let x = words.next()?.parse().ok()?;
                let y = words.next()?.parse().ok()?;
                InputEvent::CursorMoved(Vec2::new(x, y))
            }
            "click" => match words.next() {
                Some(button) => InputEvent::MouseDown(MouseButton::parse(button)?),
                None => InputEvent::MouseDown(MouseButton::Left),
            },
            "quit" => InputEvent::Quit,
            _ => return None,
        };
        if words.next().is_some() {
            return None;
        }
        Some(event)
    }
}

/// Snapshot of the input devices between two polls.
#[derive(Debug, Default)]
pub struct DeviceState {
    pressed: HashSet<Key>,
    cursor: Vec2,
    // Button presses since the last poll; drained by the binding.
    clicks: Vec<MouseButton>,
}

impl DeviceState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.pressed.remove(&key);
            }
            InputEvent::CursorMoved(position) => self.cursor = position,
            InputEvent::MouseDown(button) => self.clicks.push(button),
            InputEvent::Quit => {}
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    fn take_clicks(&mut self) -> Vec<MouseButton> {
        std::mem::take(&mut self.clicks)
    }
}

/// Maps held keys and fresh clicks to commands.
///
/// Key commands come first, in binding order, followed by mouse commands.
pub struct KeyboardMouseBinding {
    device: Rc<RefCell<DeviceState>>,
    key_binding: Vec<(Key, Command)>,
    mouse_binding: Vec<(MouseButton, fn(Vec2) -> Command)>,
}

impl KeyboardMouseBinding {
    /// WASD movement and left-click to shoot at the cursor.
    pub fn new(device: Rc<RefCell<DeviceState>>) -> Self {
        Self::with_bindings(
            device,
            vec![
                (Key::W, Command::MoveUp),
                (Key::S, Command::MoveDown),
                (Key::A, Command::MoveLeft),
                (Key::D, Command::MoveRight),
            ],
            vec![(MouseButton::Left, Command::shoot_at as fn(Vec2) -> Command)],
        )
    }

    pub fn with_bindings(
        device: Rc<RefCell<DeviceState>>,
        key_binding: Vec<(Key, Command)>,
        mouse_binding: Vec<(MouseButton, fn(Vec2) -> Command)>,
    ) -> Self {
        Self {
            device,
            key_binding,
            mouse_binding,
        }
    }
}

impl Binding for KeyboardMouseBinding {
    fn get_commands(&self) -> Vec<Command> {
        let mut device = self.device.borrow_mut();
        let clicks = device.take_clicks();

        let mut commands: Vec<Command> = self
            .key_binding
            .iter()
            .filter(|(key, _)| device.is_pressed(*key))
            .map(|(_, command)| *command)
            .collect();
        for (button, make_command) in &self.mouse_binding {
            if clicks.contains(button) {
                commands.push(make_command(device.cursor()));
            }
        }
        commands
    }
}

/// Forwards parsed stdin lines to the game loop until stdin closes or the
/// receiver is dropped.
pub async fn read_stdin_events(input_tx: mpsc::Sender<InputEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(event) = InputEvent::parse(&line) else {
                    warn!(%line, "unrecognised input line");
                    continue;
                };
                if input_tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                debug!("stdin closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
}
