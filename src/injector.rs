use std::thread;
use std::time::Duration;

use rdev::{simulate, EventType, Key};

use crate::error::{Error, Result};

/// Modifier held for the select-all shortcut.
#[cfg(target_os = "macos")]
pub const SELECT_ALL_MODIFIER: Key = Key::MetaLeft;
#[cfg(not(target_os = "macos"))]
pub const SELECT_ALL_MODIFIER: Key = Key::ControlLeft;

pub const CONFIRM_KEY: Key = Key::Return;
pub const DELETE_KEY: Key = Key::Backspace;

/// Sends key events to whatever control currently has keyboard focus.
pub trait KeyInjector {
    fn press(&mut self, key: Key) -> Result<()>;

    fn release(&mut self, key: Key) -> Result<()>;

    fn tap(&mut self, key: Key) -> Result<()> {
        self.press(key)?;
        self.release(key)
    }

    /// Ctrl+A (Cmd+A on macOS).
    fn select_all(&mut self) -> Result<()> {
        self.press(SELECT_ALL_MODIFIER)?;
        let tapped = self.tap(Key::KeyA);
        // Never leave the modifier stuck down, even if the tap failed.
        self.release(SELECT_ALL_MODIFIER)?;
        tapped
    }
}

pub struct RdevInjector {
    settle: Duration,
}

impl RdevInjector {
    pub fn new() -> Result<Self> {
        probe_platform()?;
        Ok(Self {
            settle: Duration::from_millis(1),
        })
    }

    fn send(&self, event: EventType) -> Result<()> {
        simulate(&event).map_err(|_| Error::Simulate(event))
    }
}

impl KeyInjector for RdevInjector {
    fn press(&mut self, key: Key) -> Result<()> {
        self.send(EventType::KeyPress(key))
    }

    fn release(&mut self, key: Key) -> Result<()> {
        self.send(EventType::KeyRelease(key))
    }

    fn tap(&mut self, key: Key) -> Result<()> {
        self.press(key)?;
        thread::sleep(self.settle);
        self.release(key)
    }
}

#[cfg(target_os = "linux")]
fn probe_platform() -> Result<()> {
    match std::env::var_os("DISPLAY") {
        Some(display) if !display.is_empty() => Ok(()),
        _ => Err(Error::InjectorUnavailable(
            "no X display configured (DISPLAY is unset); XTest injection needs X11 or XWayland"
                .to_string(),
        )),
    }
}

#[cfg(not(target_os = "linux"))]
fn probe_platform() -> Result<()> {
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Stroke {
        Down(Key),
        Up(Key),
    }

    /// Records every event instead of sending it. `fail_on` makes presses of
    /// that key fail, to exercise the log-and-continue path.
    #[derive(Debug, Default)]
    pub struct RecordingInjector {
        pub strokes: Vec<Stroke>,
        pub fail_on: Option<Key>,
    }

    impl RecordingInjector {
        /// Keys that were pressed, in order.
        pub fn pressed(&self) -> Vec<Key> {
            self.strokes
                .iter()
                .filter_map(|s| match s {
                    Stroke::Down(k) => Some(*k),
                    Stroke::Up(_) => None,
                })
                .collect()
        }
    }

    impl KeyInjector for RecordingInjector {
        fn press(&mut self, key: Key) -> Result<()> {
            if self.fail_on == Some(key) {
                return Err(Error::Simulate(EventType::KeyPress(key)));
            }
            self.strokes.push(Stroke::Down(key));
            Ok(())
        }

        fn release(&mut self, key: Key) -> Result<()> {
            self.strokes.push(Stroke::Up(key));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingInjector, Stroke};
    use super::*;

    #[test]
    fn tap_is_press_then_release() {
        let mut injector = RecordingInjector::default();
        injector.tap(Key::Num7).unwrap();
        assert_eq!(
            injector.strokes,
            vec![Stroke::Down(Key::Num7), Stroke::Up(Key::Num7)]
        );
    }

    #[test]
    fn select_all_wraps_a_in_modifier() {
        let mut injector = RecordingInjector::default();
        injector.select_all().unwrap();
        assert_eq!(
            injector.strokes,
            vec![
                Stroke::Down(SELECT_ALL_MODIFIER),
                Stroke::Down(Key::KeyA),
                Stroke::Up(Key::KeyA),
                Stroke::Up(SELECT_ALL_MODIFIER),
            ]
        );
    }

    #[test]
    fn select_all_releases_modifier_when_tap_fails() {
        let mut injector = RecordingInjector {
            fail_on: Some(Key::KeyA),
            ..Default::default()
        };
        assert!(injector.select_all().is_err());
        assert_eq!(
            injector.strokes,
            vec![Stroke::Down(SELECT_ALL_MODIFIER), Stroke::Up(SELECT_ALL_MODIFIER)]
        );
    }
}
