use crate::geometry::{Point, SIN60};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Triangle {
    /// Equilateral triangle whose base is centered on `anchor`.
    pub fn equilateral(anchor: Point, edge: f64, points_up: bool) -> Self {
        let height = edge * SIN60;
        let apex_y = if points_up {
            anchor.y - height
        } else {
            anchor.y + height
        };
        Self {
            points: [
                Point::new(anchor.x - edge / 2.0, anchor.y),
                Point::new(anchor.x + edge / 2.0, anchor.y),
                Point::new(anchor.x, apex_y),
            ],
        }
    }

    pub fn translated(&self, dx: f64) -> Self {
        Self {
            points: self.points.map(|p| p.offset_x(dx)),
        }
    }
}

/// Triangular selection marker. The drawn shape is always the pristine triangle moved by
/// an absolute offset, never an accumulation of small moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub anchor: Point,
    pub edge: f64,
    pub points_up: bool,
    offset_x: f64,
    pristine: Triangle,
}

impl Cursor {
    pub fn new(anchor: Point, edge: f64, points_up: bool) -> Self {
        Self {
            anchor,
            edge,
            points_up,
            offset_x: 0.0,
            pristine: Triangle::equilateral(anchor, edge, points_up),
        }
    }

    pub fn trans_x_to(&mut self, x: f64) {
        self.offset_x = x;
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn pristine(&self) -> &Triangle {
        &self.pristine
    }

    pub fn shape(&self) -> Triangle {
        self.pristine.translated(self.offset_x)
    }
}

/// The two cursors above and below the ticks, driven by the same offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPair {
    pub top: Cursor,
    pub bottom: Cursor,
}

impl CursorPair {
    pub fn new(top_anchor: Point, bottom_anchor: Point, edge: f64) -> Self {
        Self {
            top: Cursor::new(top_anchor, edge, false),
            bottom: Cursor::new(bottom_anchor, edge, true),
        }
    }

    pub fn trans_x_to(&mut self, x: f64) {
        self.top.trans_x_to(x);
        self.bottom.trans_x_to(x);
    }
}
