use std::fmt;

use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::grid::TileGrid;
use crate::tile::TileType;

/// Cells per parallel job. Boards smaller than this are counted in one job.
const CHUNK_CELLS: usize = 1 << 14;

/// Per-type cell counts. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    counts: [usize; TileType::COUNT],
}

impl Census {
    pub fn get(&self, tile: TileType) -> usize {
        self.counts[tile.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileType, usize)> + '_ {
        TileType::ALL.iter().map(|&t| (t, self.get(t)))
    }
}

/// Tallies every cell once. Fixed-size chunks are counted in parallel and summed.
pub fn census(grid: &TileGrid) -> Census {
    let counts = grid
        .cells()
        .par_chunks(CHUNK_CELLS)
        .map(|chunk| {
            let mut c = [0usize; TileType::COUNT];
            for t in chunk {
                c[t.index()] += 1;
            }
            c
        })
        .reduce(
            || [0usize; TileType::COUNT],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );
    Census { counts }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Red: {} Green: {} Blue: {} Yellow: {}",
            self.get(TileType::Red),
            self.get(TileType::Green),
            self.get(TileType::Blue),
            self.get(TileType::Yellow),
        )
    }
}

impl Serialize for Census {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
