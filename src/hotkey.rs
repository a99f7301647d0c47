use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rdev::{listen, Event, EventType, Key};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
}

/// Whether a raw input event is a press of the configured hotkey.
pub fn is_toggle(event: &EventType, hotkey: Key) -> bool {
    matches!(event, EventType::KeyPress(key) if *key == hotkey)
}

/// Watches global key presses on a background thread and forwards hotkey
/// presses to the UI thread. The driver itself is never touched here.
pub fn spawn_listener(hotkey: Arc<Mutex<Key>>, commands: Sender<Command>, ctx: egui::Context) {
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        let callback = move |event: Event| {
            let current = match hotkey.lock() {
                Ok(key) => *key,
                Err(poisoned) => *poisoned.into_inner(),
            };
            if is_toggle(&event.event_type, current) && commands.send(Command::Toggle).is_ok() {
                ctx.request_repaint();
            }
        };

        if let Err(error) = listen(callback) {
            let error = Error::Listen(format!("{error:?}"));
            tracing::error!(%error, "hotkey toggle disabled");
        }
    });
}
