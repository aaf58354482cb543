//! Full-grid connected-component pass.
//!
//! Visited tracking uses generation stamps: a cell is visited in the current
//! pass iff `stamps[i] == generation`. Advancing the counter "clears" the
//! buffer, so a steady-state scan touches no allocator and does no O(cells)
//! reset. The buffer is zeroed only when the counter would reach `u32::MAX`.
//!
//! Connectivity is strictly orthogonal, whatever pattern the caller uses for
//! interactions.

use serde::Serialize;

use crate::grid::TileGrid;
use crate::tile::TileType;

/// Components strictly larger than this are counted by default.
pub const DEFAULT_THRESHOLD: usize = 2;

/// Aggregate statistics from one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanResult {
    /// Components with `size > threshold`.
    pub components_above_threshold: usize,
    pub largest_component: usize,
}

/// One component found during a scan. `seed` is the row-major-first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub tile: TileType,
    pub seed: usize,
    pub size: usize,
}

/// Owns the stamp and queue buffers. Both are sized to the grid's cell count
/// and only resized when that count changes.
#[derive(Debug, Clone)]
pub struct Scanner {
    threshold: usize,
    generation: u32,
    stamps: Vec<u32>,
    queue: Vec<usize>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            generation: 0,
            stamps: Vec::new(),
            queue: Vec::new(),
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn ensure_buffers(&mut self, n: usize) {
        if self.stamps.len() != n {
            self.stamps.clear();
            self.stamps.resize(n, 0);
            self.queue.clear();
            self.queue.resize(n, 0);
            self.generation = 0;
        }
    }

    fn next_generation(&mut self) -> u32 {
        self.generation += 1;
        if self.generation == u32::MAX {
            self.stamps.fill(0);
            self.generation = 1;
        }
        self.generation
    }

    /// Counts components above the threshold and the largest component size.
    pub fn scan(&mut self, grid: &TileGrid) -> ScanResult {
        let threshold = self.threshold;
        let mut result = ScanResult::default();
        self.scan_components(grid, |c| {
            if c.size > threshold {
                result.components_above_threshold += 1;
            }
            result.largest_component = result.largest_component.max(c.size);
        });
        result
    }

    /// Runs the pass and reports every component, in order of its seed cell.
    pub fn scan_components<F: FnMut(Component)>(&mut self, grid: &TileGrid, mut visit: F) {
        self.ensure_buffers(grid.len());
        let generation = self.next_generation();
        let (w, h) = (grid.width(), grid.height());
        let cells = grid.cells();

        for start in 0..cells.len() {
            if self.stamps[start] == generation {
                continue;
            }
            let size = flood(cells, w, h, &mut self.stamps, &mut self.queue, start, generation);
            visit(Component {
                tile: cells[start],
                seed: start,
                size,
            });
        }
    }

    /// Collects the component containing `(x, y)` into `out` in BFS order and
    /// returns its size. Off-grid coordinates give 0 and leave `out` empty.
    pub fn component_at(&mut self, grid: &TileGrid, x: i32, y: i32, out: &mut Vec<usize>) -> usize {
        out.clear();
        let Some(start) = grid.checked_idx(x, y) else {
            return 0;
        };
        self.ensure_buffers(grid.len());
        let generation = self.next_generation();
        let size = flood(
            grid.cells(),
            grid.width(),
            grid.height(),
            &mut self.stamps,
            &mut self.queue,
            start,
            generation,
        );
        out.extend_from_slice(&self.queue[..size]);
        size
    }
}

struct Flood<'a> {
    cells: &'a [TileType],
    stamps: &'a mut [u32],
    queue: &'a mut [usize],
    generation: u32,
    tile: TileType,
    tail: usize,
}

impl Flood<'_> {
    #[inline]
    fn absorb(&mut self, i: usize) {
        if self.stamps[i] != self.generation && self.cells[i] == self.tile {
            self.stamps[i] = self.generation;
            self.queue[self.tail] = i;
            self.tail += 1;
        }
    }
}

/// BFS from `start` over same-tile orthogonal neighbors. The absorbed cells
/// end up in `queue[..size]` in visit order. `start` must be unstamped.
fn flood(
    cells: &[TileType],
    w: usize,
    h: usize,
    stamps: &mut [u32],
    queue: &mut [usize],
    start: usize,
    generation: u32,
) -> usize {
    let mut f = Flood {
        cells,
        stamps,
        queue,
        generation,
        tile: cells[start],
        tail: 0,
    };
    f.absorb(start);

    let mut head = 0;
    while head < f.tail {
        let i = f.queue[head];
        head += 1;
        let cx = i % w;
        let cy = i / w;

        // left, right, down, up
        if cx > 0 {
            f.absorb(i - 1);
        }
        if cx + 1 < w {
            f.absorb(i + 1);
        }
        if cy > 0 {
            f.absorb(i - w);
        }
        if cy + 1 < h {
            f.absorb(i + w);
        }
    }

    f.tail
}
