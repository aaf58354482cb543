//! End-to-end board lifecycle: construct, seed, mutate, rescan, interact.
//!
//! Run: cargo test --test lifecycle

use tilegrid::TileType::*;
use tilegrid::effects::EffectKind;
use tilegrid::events::PointerEvent;
use tilegrid::{Board, EffectStyle, GridError, Params, Pattern, TileGrid};

#[test]
fn test_three_by_three_scenario() {
    #[rustfmt::skip]
    let grid = TileGrid::from_vec(3, 3, vec![
        Blue, Blue, Green,
        Blue, Blue, Green,
        Green, Green, Green,
    ]).unwrap();
    let mut board = Board::with_grid(Params::default(), grid);
    let report = board.refresh();

    assert_eq!(report.scan.largest_component, 5);
    assert_eq!(report.scan.components_above_threshold, 2);
    assert_eq!(report.census.get(Blue), 4);
    assert_eq!(report.census.get(Green), 5);
    assert_eq!(report.census.total(), 9);
}

#[test]
fn test_invalid_dimensions_surface() {
    for (width, height) in [(0, 3), (3, 0), (0, 0)] {
        let params = Params {
            width,
            height,
            ..Params::default()
        };
        assert_eq!(
            Board::generate(params).unwrap_err(),
            GridError::InvalidDimensions { width, height }
        );
    }
}

#[test]
fn test_mutate_then_rescan() {
    let params = Params {
        width: 10,
        height: 6,
        seed: 99,
        ..Params::default()
    };
    let (mut board, first) = Board::generate(params).unwrap();
    assert_eq!(first.census.total(), 60);

    // Paint the whole board one type in a single batch.
    let edits: Vec<_> = (0..10)
        .flat_map(|x| (0..6).map(move |y| (x, y, Red)))
        .collect();
    let report = board.apply(edits);
    assert_eq!(report.scan.largest_component, 60);
    assert_eq!(report.scan.components_above_threshold, 1);
    assert_eq!(report.census.get(Red), 60);
    assert_eq!(board.last_scan(), report.scan);
}

#[test]
fn test_neighbor_queries_through_board() {
    let (board, _) = Board::generate(Params::default()).unwrap();
    let grid = board.grid();
    let ortho: Vec<_> = grid.neighbors(3, 3, Pattern::Orthogonal4).collect();
    assert_eq!(ortho, vec![(2, 3), (4, 3), (3, 2), (3, 4)]);
    assert_eq!(grid.neighbors24(3, 3).count(), 24);
    assert_eq!(grid.neighbors24(0, 0).count(), 8);
    assert_eq!(grid.neighbors(7, 7, Pattern::Extended16).count(), 6);
}

#[test]
fn test_push_style_interaction() {
    let params = Params {
        effect: EffectStyle::Push,
        ..Params::default()
    };
    let (mut board, _) = Board::generate(params).unwrap();
    let before = board.grid().clone();

    board.push_event(PointerEvent::Down { x: 4, y: 4 });
    board.push_event(PointerEvent::Up { x: 4, y: 4 });
    let effects = board.drain_events();

    let kinds: Vec<_> = effects.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EffectKind::PushOut, EffectKind::PushBack]);
    assert_eq!(effects[0].cells.len(), 24);
    assert_eq!(board.grid(), &before);
}
