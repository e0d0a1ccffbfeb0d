//! Keyboard snapshot and clean-press detection

/// Digital key state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub space: bool,
}

/// Registers a press only on the tick a key goes from released to held
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanPress {
    held: bool,
}

impl CleanPress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current key level; true only on a fresh press
    pub fn pressed(&mut self, down: bool) -> bool {
        let fresh = down && !self.held;
        self.held = down;
        fresh
    }
}

/// Space taps on a fixed schedule, for runs without a keyboard.
///
/// Space is held on the first frame of every `period` frames and released on
/// the rest, so each tap is one clean press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapScript {
    period: u64,
}

impl TapScript {
    /// `None` for a zero period (never tap)
    pub fn every(period: u64) -> Option<Self> {
        (period > 0).then_some(Self { period })
    }

    pub fn keys_at(&self, frame: u64) -> KeyState {
        KeyState {
            space: frame % self.period == 0,
        }
    }
}
