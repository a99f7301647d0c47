use crate::code::GuessCode;

/// Every code typed since launch, in generation order.
#[derive(Debug, Default, Clone)]
pub struct AttemptHistory {
    codes: Vec<GuessCode>,
}

impl AttemptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, code: GuessCode) {
        self.codes.push(code);
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuessCode> {
        self.codes.iter()
    }

    pub fn latest(&self) -> Option<GuessCode> {
        self.codes.last().copied()
    }

    /// `(ordinal, code)` pairs for display, newest first. Ordinals start at 1.
    pub fn entries_newest_first(&self) -> impl Iterator<Item = (usize, GuessCode)> + '_ {
        self.iter()
            .copied()
            .enumerate()
            .rev()
            .map(|(i, code)| (i + 1, code))
    }
}
