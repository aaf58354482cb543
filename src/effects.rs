//! Cell sets touched by a pointer interaction.
//!
//! Presentation decides how to animate them; this module only decides
//! which cells are involved and how far each is from the origin.

use serde::Serialize;

use crate::grid::offset_xy;
use crate::neighbors::neighbors24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Rocket,
    PushOut,
    PushBack,
}

/// One affected cell. For rockets `step` is the ring distance along the
/// row or column (0 at the origin); for pushes it is the Extended-24 level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affected {
    pub x: usize,
    pub y: usize,
    pub step: usize,
}

impl Affected {
    /// `1 / step`, with the origin treated as step 1. Pushes scale their
    /// displacement by this, so level-2 cells move half as far.
    pub fn strength(&self) -> f32 {
        1.0 / self.step.max(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub origin: (usize, usize),
    pub cells: Vec<Affected>,
}

impl Effect {
    /// `None` when the origin is off the grid.
    pub fn new(kind: EffectKind, x: i32, y: i32, w: usize, h: usize) -> Option<Effect> {
        let origin = offset_xy(x, y, 0, 0, w, h)?;
        let cells = match kind {
            EffectKind::Rocket => rocket_cells(origin, w, h),
            EffectKind::PushOut | EffectKind::PushBack => push_cells(origin, w, h),
        };
        Some(Effect {
            kind,
            origin,
            cells,
        })
    }
}

/// The origin's column then its row, ring by ring outward. Within a ring the
/// `+` side comes first. The origin appears once, at step 0.
pub fn rocket_cells((ox, oy): (usize, usize), w: usize, h: usize) -> Vec<Affected> {
    let mut cells = Vec::with_capacity(w + h - 1);
    cells.push(Affected { x: ox, y: oy, step: 0 });

    let y_steps = oy.max(h - 1 - oy);
    for i in 1..=y_steps {
        if oy + i < h {
            cells.push(Affected { x: ox, y: oy + i, step: i });
        }
        if i <= oy {
            cells.push(Affected { x: ox, y: oy - i, step: i });
        }
    }

    let x_steps = ox.max(w - 1 - ox);
    for i in 1..=x_steps {
        if ox + i < w {
            cells.push(Affected { x: ox + i, y: oy, step: i });
        }
        if i <= ox {
            cells.push(Affected { x: ox - i, y: oy, step: i });
        }
    }

    cells
}

/// Extended-24 ring around the origin, graded by level.
pub fn push_cells((ox, oy): (usize, usize), w: usize, h: usize) -> Vec<Affected> {
    neighbors24(ox as i32, oy as i32, w, h)
        .map(|(x, y, level)| Affected {
            x,
            y,
            step: level as usize,
        })
        .collect()
}
