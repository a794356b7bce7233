// Shared fixtures for the integration tests.
#![allow(dead_code)]

use chase_arena::domain::{Binding, Command, KillEvent, LoadedAsset, Observer, Rect, Sprite};
use std::cell::RefCell;
use std::rc::Rc;

// Square solid-colour asset with its top-left corner at (x, y).
pub fn asset(x: f32, y: f32, size: f32) -> LoadedAsset {
    LoadedAsset {
        sprite: Sprite::solid("fixture", 1, 1, [0, 0, 0, 255]),
        rect: Rect::new(x, y, size, size),
    }
}

// Binding with no device attached.
pub struct NoInput;

impl Binding for NoInput {
    fn get_commands(&self) -> Vec<Command> {
        Vec::new()
    }
}

// Binding that returns the same commands every frame.
pub struct Scripted(pub Vec<Command>);

impl Binding for Scripted {
    fn get_commands(&self) -> Vec<Command> {
        self.0.clone()
    }
}

// Observer that keeps every kill it is told about.
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<KillEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> (Self, Rc<RefCell<Vec<KillEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: Rc::clone(&events),
            },
            events,
        )
    }
}

impl Observer<KillEvent> for RecordingObserver {
    fn on_notify(&self, event: &KillEvent) {
        self.events.borrow_mut().push(*event);
    }
}
