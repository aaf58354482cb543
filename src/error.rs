use thiserror::Error;

/// Errors surfaced while assembling a grid.
///
/// Everything past construction is total: out-of-range reads fall back,
/// out-of-range writes are dropped and enumeration skips off-grid offsets.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: both must be in 1..=i32::MAX")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell count mismatch: {width}x{height} grid needs {expected} cells, got {actual}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
