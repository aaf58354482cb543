use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of tile types a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileType {
    #[default]
    Blue = 0,
    Green = 1,
    Red = 2,
    Yellow = 3,
}

impl TileType {
    pub const COUNT: usize = 4;

    /// All variants in discriminant order.
    pub const ALL: [TileType; Self::COUNT] =
        [TileType::Blue, TileType::Green, TileType::Red, TileType::Yellow];

    /// Returned by `Grid::get_cell` for off-grid coordinates.
    ///
    /// This is a real tile type, not a sentinel, so callers probing raw
    /// coordinates near the edge will see Green cells that do not exist.
    pub const FALLBACK: TileType = TileType::Green;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps `0..COUNT` onto a variant; anything else wraps modulo `COUNT`.
    #[inline]
    pub fn from_index(i: usize) -> TileType {
        Self::ALL[i % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            TileType::Blue => "Blue",
            TileType::Green => "Green",
            TileType::Red => "Red",
            TileType::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
