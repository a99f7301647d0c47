use std::fmt;

use rand::Rng;
use rdev::Key;

const MIN_CODE: u32 = 100_000;
const MAX_CODE: u32 = 999_999;

/// A six digit game code. Always in `100000..=999999`, so it never needs
/// zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessCode(u32);

impl GuessCode {
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(MIN_CODE..=MAX_CODE))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Most significant digit first.
    pub fn digits(self) -> [u8; 6] {
        let mut out = [0u8; 6];
        let mut rest = self.0;
        for slot in out.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        out
    }
}

impl fmt::Display for GuessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.value())
    }
}

pub fn digit_key(digit: u8) -> Option<Key> {
    match digit {
        0 => Some(Key::Num0),
        1 => Some(Key::Num1),
        2 => Some(Key::Num2),
        3 => Some(Key::Num3),
        4 => Some(Key::Num4),
        5 => Some(Key::Num5),
        6 => Some(Key::Num6),
        7 => Some(Key::Num7),
        8 => Some(Key::Num8),
        9 => Some(Key::Num9),
        _ => None,
    }
}
