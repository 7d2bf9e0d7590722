use crate::geometry::{self, Point, Projection, Rect};
use std::f64::consts::TAU;

/// First tick index; ticks run from `FIRST_TICK` to `FIRST_TICK + TICK_COUNT - 1`.
pub const FIRST_TICK: i32 = -45;
pub const TICK_COUNT: usize = 90;
/// Dial rotation between neighbouring ticks, in degrees.
pub const TICK_SPACING_DEG: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub length: f64,
    pub screen_x: f64,
    pub angle: f64,
    pub front_facing: bool,
}

impl Tick {
    fn at_index(index: i32, length: f64, projection: &Projection) -> Self {
        // sign preserving remainder, like the angle stored for every tick
        let angle = (f64::from(index) * TICK_SPACING_DEG).to_radians() % TAU;
        let mut tick = Self {
            length,
            screen_x: 0.0,
            angle,
            front_facing: false,
        };
        tick.project(projection);
        tick
    }

    /// Recomputes visibility; `screen_x` is only refreshed for front-facing ticks.
    fn project(&mut self, projection: &Projection) {
        self.front_facing = geometry::is_front_facing(self.angle);
        if self.front_facing {
            self.screen_x = projection.tick_screen_x(self.angle);
        }
    }
}

/// Fixed set of calibration ticks, rebuilt on layout change and rotated in place on drag.
#[derive(Debug, Clone)]
pub struct TickRegistry {
    ticks: Vec<Tick>,
    projection: Option<Projection>,
}

impl Default for TickRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TickRegistry {
    pub fn new() -> Self {
        Self {
            ticks: Vec::with_capacity(TICK_COUNT),
            projection: None,
        }
    }

    pub fn rebuild(&mut self, projection: Projection, length: f64) {
        self.ticks.clear();
        self.ticks.extend(
            (FIRST_TICK..FIRST_TICK + TICK_COUNT as i32)
                .map(|i| Tick::at_index(i, length, &projection)),
        );
        self.projection = Some(projection);
        log::debug!(
            "Rebuilt {} ticks, radius={:.2}, {} front-facing",
            self.ticks.len(),
            projection.radius,
            self.front_count()
        );
    }

    pub fn apply_delta(&mut self, delta: f64) {
        let Some(projection) = self.projection else {
            return;
        };
        if self.ticks.is_empty() || delta == 0.0 {
            return;
        }
        for tick in &mut self.ticks {
            tick.angle += delta;
            tick.project(&projection);
        }
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
        self.projection = None;
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    pub fn front_facing(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| t.front_facing)
    }

    pub fn front_count(&self) -> usize {
        self.front_facing().count()
    }

    /// Vertical line segments for the visible ticks, centered on the bounds' midline.
    pub fn segments<'a>(&'a self, bounds: &'a Rect) -> impl Iterator<Item = (Point, Point)> + 'a {
        self.front_facing().map(move |t| {
            let start_y = bounds.top + (bounds.height() - t.length) / 2.0;
            (
                Point::new(t.screen_x, start_y),
                Point::new(t.screen_x, start_y + t.length),
            )
        })
    }
}
