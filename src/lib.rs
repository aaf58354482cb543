//! Tile grid model with a stamp-based flood-fill scanner and fixed
//! neighbor patterns.
//!
//! The crate is toolkit independent: it owns the cells and answers
//! structural queries, and a presentation layer decides how to show them.

pub mod board;
pub mod census;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod grid;
pub mod neighbors;
pub mod rng;
pub mod scan;
pub mod tile;

pub use board::{Board, Report, Timing};
pub use census::Census;
pub use config::{EffectStyle, Params};
pub use error::GridError;
pub use grid::{Grid, TileGrid};
pub use neighbors::Pattern;
pub use scan::{ScanResult, Scanner};
pub use tile::TileType;
