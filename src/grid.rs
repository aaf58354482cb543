use crate::error::GridError;
use crate::neighbors::{Leveled, Neighbors, Pattern};
use crate::rng::Rng;
use crate::tile::TileType;

/// Largest accepted dimension. Coordinates are `i32` at the public boundary
/// so that callers can pass negative values and have them rejected.
pub const MAX_DIM: usize = i32::MAX as usize;

/// Row-major flat grid, `index = x + y * w`. Dimensions are fixed at
/// construction; cells are only ever overwritten, never added or removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    w: usize,
    h: usize,
}

/// The tile board itself.
pub type TileGrid = Grid<TileType>;

fn check_dims(w: usize, h: usize) -> Result<usize, GridError> {
    let bad = GridError::InvalidDimensions { width: w, height: h };
    if w == 0 || h == 0 || w > MAX_DIM || h > MAX_DIM {
        return Err(bad);
    }
    w.checked_mul(h).ok_or(bad)
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Result<Self, GridError> {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(w: usize, h: usize, value: T) -> Result<Self, GridError> {
        let n = check_dims(w, h)?;
        Ok(Self {
            data: vec![value; n],
            w,
            h,
        })
    }

    /// Wraps an existing row-major cell sequence.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Result<Self, GridError> {
        let n = check_dims(w, h)?;
        if data.len() != n {
            return Err(GridError::CellCountMismatch {
                width: w,
                height: h,
                expected: n,
                actual: data.len(),
            });
        }
        Ok(Self { data, w, h })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Number of cells, `width * height`. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects zero-sized grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    /// Unchecked index for hot paths. Caller guarantees `x < w && y < h`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        x + y * self.w
    }

    #[inline]
    pub fn xy(&self, i: usize) -> (usize, usize) {
        (i % self.w, i / self.w)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        in_bounds(x, y, self.w, self.h)
    }

    /// Checked index for the public boundary.
    #[inline]
    pub fn checked_idx(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(x as usize + y as usize * self.w)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// `(x + dx, y + dy)` if it lands on the grid. Cell contents are not consulted.
    #[inline]
    pub fn try_get_neighbor(&self, x: i32, y: i32, dx: i32, dy: i32) -> Option<(usize, usize)> {
        offset_xy(x, y, dx, dy, self.w, self.h)
    }

    /// In-bounds cells around `(x, y)` in the pattern's table order.
    pub fn neighbors(&self, x: i32, y: i32, pattern: Pattern) -> Neighbors {
        Neighbors::new(x, y, self.w, self.h, pattern)
    }

    /// Extended-24 enumeration with each result's proximity level.
    pub fn neighbors24(&self, x: i32, y: i32) -> Leveled {
        Neighbors::new(x, y, self.w, self.h, Pattern::Extended24).leveled()
    }
}

impl Grid<TileType> {
    /// Stored tile, or `TileType::FALLBACK` when `(x, y)` is off the grid.
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> TileType {
        match self.checked_idx(x, y) {
            Some(i) => self.data[i],
            None => TileType::FALLBACK,
        }
    }

    /// Overwrites one cell. Off-grid writes are dropped. Does not rescan.
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, value: TileType) {
        if let Some(i) = self.checked_idx(x, y) {
            self.data[i] = value;
        }
    }

    /// Draws every cell independently and uniformly, in index order.
    pub fn randomize(&mut self, rng: &mut Rng) {
        for cell in &mut self.data {
            *cell = rng.tile();
        }
    }
}

/// Single unsigned compare per axis: negative coordinates become huge.
#[inline]
pub fn in_bounds(x: i32, y: i32, w: usize, h: usize) -> bool {
    (x as u32 as usize) < w && (y as u32 as usize) < h
}

#[inline]
pub fn offset_xy(x: i32, y: i32, dx: i32, dy: i32, w: usize, h: usize) -> Option<(usize, usize)> {
    let nx = x.checked_add(dx)?;
    let ny = y.checked_add(dy)?;
    if in_bounds(nx, ny, w, h) {
        Some((nx as usize, ny as usize))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            TileGrid::new(0, 4),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(TileGrid::new(4, 0).is_err());
        assert!(TileGrid::new(MAX_DIM + 1, 1).is_err());
    }

    #[test]
    fn test_smallest_grid_is_not_empty() {
        let g = TileGrid::new(1, 1).unwrap();
        assert_eq!(g.len(), 1);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = TileGrid::from_vec(2, 2, vec![Blue; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::CellCountMismatch { width: 2, height: 2, expected: 4, actual: 3 }
        );
    }

    #[test]
    fn test_index_is_row_major() {
        let g = TileGrid::new(5, 3).unwrap();
        assert_eq!(g.idx(0, 0), 0);
        assert_eq!(g.idx(4, 0), 4);
        assert_eq!(g.idx(0, 1), 5);
        assert_eq!(g.idx(3, 2), 13);
        assert_eq!(g.xy(13), (3, 2));
        assert_eq!(g.checked_idx(3, 2), Some(13));
        assert_eq!(g.checked_idx(5, 0), None);
    }

    #[test]
    fn test_in_bounds_negative() {
        let g = TileGrid::new(4, 4).unwrap();
        assert!(g.in_bounds(0, 0));
        assert!(g.in_bounds(3, 3));
        assert!(!g.in_bounds(-1, 0));
        assert!(!g.in_bounds(0, -1));
        assert!(!g.in_bounds(4, 0));
        assert!(!g.in_bounds(i32::MIN, i32::MIN));
    }

    #[test]
    fn test_get_cell_fallback() {
        let g = TileGrid::filled(3, 3, Red).unwrap();
        assert_eq!(g.get_cell(-1, 0), TileType::FALLBACK);
        assert_eq!(g.get_cell(0, 3), Green);
        assert_eq!(g.get_cell(1, 1), Red);
    }

    #[test]
    fn test_set_cell_out_of_bounds_is_noop() {
        let mut g = TileGrid::filled(3, 3, Red).unwrap();
        let before = g.clone();
        g.set_cell(-1, 0, Yellow);
        g.set_cell(3, 0, Yellow);
        g.set_cell(0, i32::MAX, Yellow);
        assert_eq!(g, before);

        g.set_cell(2, 1, Yellow);
        assert_eq!(g.get(2, 1), Yellow);
        assert_eq!(g.cells().iter().filter(|&&t| t == Yellow).count(), 1);
    }

    #[test]
    fn test_try_get_neighbor() {
        let g = TileGrid::new(3, 3).unwrap();
        assert_eq!(g.try_get_neighbor(1, 1, 1, 1), Some((2, 2)));
        assert_eq!(g.try_get_neighbor(0, 0, -1, 0), None);
        assert_eq!(g.try_get_neighbor(2, 2, 0, 1), None);
        assert_eq!(g.try_get_neighbor(i32::MAX, 0, 1, 0), None);
    }

    #[test]
    fn test_randomize_deterministic() {
        let mut a = TileGrid::new(16, 16).unwrap();
        let mut b = TileGrid::new(16, 16).unwrap();
        a.randomize(&mut Rng::new(7));
        b.randomize(&mut Rng::new(7));
        assert_eq!(a, b);

        let mut c = TileGrid::new(16, 16).unwrap();
        c.randomize(&mut Rng::new(8));
        assert_ne!(a, c);
    }
}
