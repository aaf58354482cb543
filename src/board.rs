use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::census::{Census, census};
use crate::config::{EffectStyle, Params};
use crate::effects::{Effect, EffectKind};
use crate::error::GridError;
use crate::events::{EventQueue, PointerEvent};
use crate::grid::TileGrid;
use crate::rng::Rng;
use crate::scan::{ScanResult, Scanner};
use crate::tile::TileType;

#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Statistics published by one `refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub census: Census,
    pub scan: ScanResult,
    pub timings: Vec<Timing>,
}

/// Grid, scanner and published statistics as one exclusively-owned unit.
///
/// Mutations never rescan on their own; call `refresh` (or `apply`, which
/// batches edits and refreshes once) when the statistics should catch up.
#[derive(Debug, Clone)]
pub struct Board {
    params: Params,
    grid: TileGrid,
    scanner: Scanner,
    census: Census,
    scan: ScanResult,
    events: EventQueue,
}

impl Board {
    /// Allocates a `width x height` board of `TileType::default()` cells.
    pub fn new(params: Params) -> Result<Self, GridError> {
        let grid = TileGrid::new(params.width, params.height)?;
        Ok(Self::assemble(params, grid))
    }

    /// Wraps an existing grid; `params.width`/`height` are taken from it.
    pub fn with_grid(mut params: Params, grid: TileGrid) -> Self {
        params.width = grid.width();
        params.height = grid.height();
        Self::assemble(params, grid)
    }

    fn assemble(params: Params, grid: TileGrid) -> Self {
        Self {
            scanner: Scanner::with_threshold(params.component_threshold),
            params,
            grid,
            census: Census::default(),
            scan: ScanResult::default(),
            events: EventQueue::new(),
        }
    }

    /// Startup sequence: allocate, fill from `params.seed`, census, scan.
    pub fn generate(params: Params) -> Result<(Self, Report), GridError> {
        let mut board = Self::new(params)?;
        let t = Instant::now();
        board.randomize(&mut Rng::new(board.params.seed));
        let randomize_ms = t.elapsed().as_secs_f64() * 1000.0;

        let mut report = board.refresh();
        report.timings.insert(
            0,
            Timing {
                name: "randomize",
                ms: randomize_ms,
            },
        );
        Ok((board, report))
    }

    pub fn randomize(&mut self, rng: &mut Rng) {
        self.grid.randomize(rng);
    }

    /// Re-runs census and scan and publishes the results.
    pub fn refresh(&mut self) -> Report {
        let mut timings = Vec::new();
        let total_start = Instant::now();

        let t = Instant::now();
        self.census = census(&self.grid);
        timings.push(Timing {
            name: "census",
            ms: t.elapsed().as_secs_f64() * 1000.0,
        });

        let t = Instant::now();
        self.scan = self.scanner.scan(&self.grid);
        timings.push(Timing {
            name: "scan",
            ms: t.elapsed().as_secs_f64() * 1000.0,
        });

        timings.push(Timing {
            name: "TOTAL",
            ms: total_start.elapsed().as_secs_f64() * 1000.0,
        });

        info!("{}", self.census);
        debug!(
            components = self.scan.components_above_threshold,
            largest = self.scan.largest_component,
            threshold = self.scanner.threshold(),
            generation = self.scanner.generation(),
            "scan complete"
        );

        Report {
            census: self.census,
            scan: self.scan,
            timings,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Census from the last `refresh`.
    pub fn census(&self) -> &Census {
        &self.census
    }

    /// Scan result from the last `refresh`.
    pub fn last_scan(&self) -> ScanResult {
        self.scan
    }

    pub fn get_cell(&self, x: i32, y: i32) -> TileType {
        self.grid.get_cell(x, y)
    }

    /// Does not rescan.
    pub fn set_cell(&mut self, x: i32, y: i32, value: TileType) {
        self.grid.set_cell(x, y, value);
    }

    /// Applies a batch of edits, then refreshes once.
    pub fn apply<I>(&mut self, edits: I) -> Report
    where
        I: IntoIterator<Item = (i32, i32, TileType)>,
    {
        for (x, y, tile) in edits {
            self.grid.set_cell(x, y, tile);
        }
        self.refresh()
    }

    /// Cells of the component containing `(x, y)` in BFS order.
    pub fn component_at(&mut self, x: i32, y: i32) -> Vec<(usize, usize)> {
        let mut idx = Vec::new();
        self.scanner.component_at(&self.grid, x, y, &mut idx);
        idx.into_iter().map(|i| self.grid.xy(i)).collect()
    }

    pub fn push_event(&mut self, event: PointerEvent) {
        self.events.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Pops every queued event in order and returns the effects they produce.
    pub fn drain_events(&mut self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(self.events.len());
        while let Some(event) = self.events.pop() {
            if let Some(effect) = self.respond(event) {
                effects.push(effect);
            }
        }
        effects
    }

    /// Maps one event to its effect under the configured style. Never mutates cells.
    pub fn respond(&self, event: PointerEvent) -> Option<Effect> {
        let kind = match (self.params.effect, event) {
            (EffectStyle::Rocket, PointerEvent::Down { .. }) => EffectKind::Rocket,
            (EffectStyle::Rocket, PointerEvent::Up { .. }) => return None,
            (EffectStyle::Push, PointerEvent::Down { .. }) => EffectKind::PushOut,
            (EffectStyle::Push, PointerEvent::Up { .. }) => EffectKind::PushBack,
        };
        let (x, y) = event.position();
        Effect::new(kind, x, y, self.grid.width(), self.grid.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType::*;

    fn scenario() -> Board {
        #[rustfmt::skip]
        let grid = TileGrid::from_vec(3, 3, vec![
            Blue, Blue, Green,
            Blue, Blue, Green,
            Green, Green, Green,
        ]).unwrap();
        Board::with_grid(Params::default(), grid)
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        let params = Params {
            width: 0,
            ..Params::default()
        };
        assert_eq!(
            Board::new(params).unwrap_err(),
            GridError::InvalidDimensions { width: 0, height: 8 }
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let (a, ra) = Board::generate(Params::default()).unwrap();
        let (b, rb) = Board::generate(Params::default()).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(ra.scan, rb.scan);
        assert_eq!(ra.census, rb.census);
        let names: Vec<_> = ra.timings.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["randomize", "census", "scan", "TOTAL"]);
    }

    #[test]
    fn test_set_cell_does_not_rescan() {
        let mut board = scenario();
        let before = board.refresh();
        assert_eq!(before.scan.largest_component, 5);

        board.set_cell(2, 0, Blue);
        board.set_cell(2, 1, Blue);
        assert_eq!(board.last_scan(), before.scan);

        let after = board.refresh();
        assert_eq!(after.scan.largest_component, 6);
        assert_eq!(after.scan.components_above_threshold, 2);
        assert_eq!(board.census().get(Blue), 6);
    }

    #[test]
    fn test_apply_batches_then_refreshes() {
        let mut board = scenario();
        let report = board.apply([(0, 2, Red), (1, 2, Red), (2, 2, Red), (-1, 0, Red)]);
        assert_eq!(report.census.get(Red), 3);
        assert_eq!(report.census.total(), 9);
        assert_eq!(report.scan.components_above_threshold, 2);
        assert_eq!(report.scan.largest_component, 4);
    }

    #[test]
    fn test_component_at() {
        let mut board = scenario();
        assert_eq!(board.component_at(0, 0), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert!(board.component_at(3, 0).is_empty());
    }

    #[test]
    fn test_rocket_events() {
        let mut board = scenario();
        board.push_event(PointerEvent::Down { x: 1, y: 1 });
        board.push_event(PointerEvent::Up { x: 1, y: 1 });
        board.push_event(PointerEvent::Down { x: 9, y: 9 });
        let effects = board.drain_events();
        assert_eq!(board.pending_events(), 0);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::Rocket);
        assert_eq!(effects[0].cells.len(), 5);
        // events never touch cells
        assert_eq!(board.get_cell(1, 1), Blue);
    }

    #[test]
    fn test_push_events() {
        let params = Params {
            effect: EffectStyle::Push,
            ..Params::default()
        };
        let board = Board::new(params).unwrap();
        let out = board.respond(PointerEvent::Down { x: 0, y: 0 }).unwrap();
        let back = board.respond(PointerEvent::Up { x: 0, y: 0 }).unwrap();
        assert_eq!(out.kind, EffectKind::PushOut);
        assert_eq!(back.kind, EffectKind::PushBack);
        assert_eq!(out.cells, back.cells);
        assert_eq!(out.cells.len(), 8);
    }
}
