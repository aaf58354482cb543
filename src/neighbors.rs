//! Fixed neighbor patterns around a cell.
//!
//! Each pattern is a const offset table. Enumeration walks the table in
//! order and drops offsets that fall off the grid, so the output order is
//! the table order (not sorted by distance or angle).

use std::iter::FusedIterator;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::grid::offset_xy;

/// Unit axis steps: left, right, down, up.
pub const ORTHOGONAL_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Axis steps, then diagonals: right-up, left-down, left-up, right-down.
pub const OCTAGONAL_8: [(i32, i32); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (1, 1), (-1, -1), (-1, 1), (1, -1),
];

/// Octagonal-8 followed by the same eight directions at distance 2.
pub const EXTENDED_16: [(i32, i32); 16] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (1, 1), (-1, -1), (-1, 1), (1, -1),
    (-2, 0), (2, 0), (0, -2), (0, 2),
    (2, 2), (-2, -2), (-2, 2), (2, -2),
];

/// Extended-16 followed by the eight knight moves.
pub const EXTENDED_24: [(i32, i32); 24] = [
    // 1-step straight
    (-1, 0), (1, 0), (0, -1), (0, 1),
    // 1-step diagonal
    (1, 1), (-1, -1), (-1, 1), (1, -1),
    // 2-step straight
    (-2, 0), (2, 0), (0, -2), (0, 2),
    // 2-step diagonal
    (2, 2), (-2, -2), (-2, 2), (2, -2),
    // knight
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Orthogonal4,
    Octagonal8,
    Extended16,
    Extended24,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Orthogonal4,
        Pattern::Octagonal8,
        Pattern::Extended16,
        Pattern::Extended24,
    ];

    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Pattern::Orthogonal4 => &ORTHOGONAL_4,
            Pattern::Octagonal8 => &OCTAGONAL_8,
            Pattern::Extended16 => &EXTENDED_16,
            Pattern::Extended24 => &EXTENDED_24,
        }
    }
}

/// Two-bucket proximity: 1 for the immediate ring (max |component| == 1),
/// 2 for everything else. Knight moves are level 2, same as a 2-step
/// straight move, so this is not a distance.
#[inline]
pub fn level(dx: i32, dy: i32) -> u8 {
    if dx.abs().max(dy.abs()) == 1 { 1 } else { 2 }
}

/// Lazy, allocation-free walk over one pattern around `(x, y)`.
#[derive(Clone, Debug)]
pub struct Neighbors {
    x: i32,
    y: i32,
    w: usize,
    h: usize,
    offsets: slice::Iter<'static, (i32, i32)>,
}

impl Neighbors {
    pub fn new(x: i32, y: i32, w: usize, h: usize, pattern: Pattern) -> Self {
        Self {
            x,
            y,
            w,
            h,
            offsets: pattern.offsets().iter(),
        }
    }

    /// Attach each result's `level` to the output.
    pub fn leveled(self) -> Leveled {
        Leveled { inner: self }
    }

    fn next_with_offset(&mut self) -> Option<(usize, usize, (i32, i32))> {
        for &(dx, dy) in self.offsets.by_ref() {
            if let Some((nx, ny)) = offset_xy(self.x, self.y, dx, dy, self.w, self.h) {
                return Some((nx, ny, (dx, dy)));
            }
        }
        None
    }
}

impl Iterator for Neighbors {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_offset().map(|(nx, ny, _)| (nx, ny))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}

impl FusedIterator for Neighbors {}

/// `Neighbors` yielding `(nx, ny, level)`.
#[derive(Clone, Debug)]
pub struct Leveled {
    inner: Neighbors,
}

impl Iterator for Leveled {
    type Item = (usize, usize, u8);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next_with_offset()
            .map(|(nx, ny, (dx, dy))| (nx, ny, level(dx, dy)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl FusedIterator for Leveled {}

pub fn neighbors4(x: i32, y: i32, w: usize, h: usize) -> Neighbors {
    Neighbors::new(x, y, w, h, Pattern::Orthogonal4)
}

pub fn neighbors8(x: i32, y: i32, w: usize, h: usize) -> Neighbors {
    Neighbors::new(x, y, w, h, Pattern::Octagonal8)
}

pub fn neighbors16(x: i32, y: i32, w: usize, h: usize) -> Neighbors {
    Neighbors::new(x, y, w, h, Pattern::Extended16)
}

pub fn neighbors24(x: i32, y: i32, w: usize, h: usize) -> Leveled {
    Neighbors::new(x, y, w, h, Pattern::Extended24).leveled()
}
