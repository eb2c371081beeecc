use std::fmt;

/// 1-based level number as shown to the player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct LevelId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("level numbers start at 1")]
pub struct ZeroLevelError;

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);

    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Zero-based position in a catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for LevelId {
    type Error = ZeroLevelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroLevelError)
    }
}

impl From<LevelId> for u32 {
    fn from(value: LevelId) -> Self {
        value.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
