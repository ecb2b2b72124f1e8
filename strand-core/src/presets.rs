//! Discrete control presets.
//!
//! Each control cycles (or selects) among three fixed values. The state
//! transitions are pure functions so they can be driven by any input
//! source and tested without one.

/// Strand count control: 1 → 100 → 1000 → 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrandCountPreset {
    One,
    Hundred,
    Thousand,
}

impl StrandCountPreset {
    pub const ALL: [Self; 3] = [Self::One, Self::Hundred, Self::Thousand];

    pub fn next(self) -> Self {
        match self {
            Self::One => Self::Hundred,
            Self::Hundred => Self::Thousand,
            Self::Thousand => Self::One,
        }
    }

    pub fn value(self) -> usize {
        match self {
            Self::One => 1,
            Self::Hundred => 100,
            Self::Thousand => 1000,
        }
    }

    /// The preset whose value is exactly `count`, if any.
    pub fn from_value(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == count)
    }
}

/// Rest length control: 20 → 50 → 100 → 20.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestLengthPreset {
    Short,
    Medium,
    Long,
}

impl RestLengthPreset {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn next(self) -> Self {
        match self {
            Self::Short => Self::Medium,
            Self::Medium => Self::Long,
            Self::Long => Self::Short,
        }
    }

    pub fn value(self) -> f32 {
        match self {
            Self::Short => 20.0,
            Self::Medium => 50.0,
            Self::Long => 100.0,
        }
    }

    pub fn from_value(length: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == length)
    }
}

/// Gravity selection. Unlike the other two controls this one is picked
/// directly (keys 1, 2, 3) rather than cycled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GravityPreset {
    Heavy,
    Medium,
    Light,
}

impl GravityPreset {
    pub const ALL: [Self; 3] = [Self::Heavy, Self::Medium, Self::Light];

    pub fn value(self) -> f32 {
        match self {
            Self::Heavy => 5000.0,
            Self::Medium => 250.0,
            Self::Light => 100.0,
        }
    }

    /// 1-based mode number shown in the status line.
    pub fn mode(self) -> u8 {
        match self {
            Self::Heavy => 1,
            Self::Medium => 2,
            Self::Light => 3,
        }
    }

    pub fn from_value(gravity: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == gravity)
    }
}
