//! Screen-space regions derived from the view size. Everything here is a pure function of
//! the bounds and the label font, and is recomputed wholesale whenever the size changes.

use crate::cursor::CursorPair;
use crate::geometry::{Point, Projection, Rect, SIN60};
use crate::label::DegreeLabel;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURSOR_GAP: f64 = 20.0;
/// Edge fades each cover this fraction of the draw width.
pub const EDGE_FADE_FRACTION: f64 = 1.0 / 7.0;
const TEXT_PAD_X: f64 = 12.0;
const TEXT_PAD_Y: f64 = 4.0;
const MIN_HEIGHT_SLACK: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Text measurement capability of the host toolkit.
pub trait TextMetrics {
    fn measure(&self, text: &str) -> TextExtent;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// A rect filled with a horizontal linear gradient running from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientRect {
    pub rect: Rect,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Masks {
    pub left: GradientRect,
    pub right: GradientRect,
    pub vignette: GradientRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub view: Rect,
    pub bounds: Rect,
    pub projection: Projection,
    pub tick_length: f64,
    pub cursor_edge: f64,
    pub top_anchor: Point,
    pub bottom_anchor: Point,
    pub text_rect: Rect,
    pub label_baseline: f64,
    pub masks: Masks,
}

fn tick_length(sample: &TextExtent) -> f64 {
    (sample.height * 4.0 / 7.0).floor()
}

/// Widest label of the default range. The tick and the text box are sized from it
/// whatever the configured range is.
pub const SAMPLE_DEGREE: f64 = -45.0;

pub fn sample_label() -> DegreeLabel {
    DegreeLabel::from_degree(SAMPLE_DEGREE)
}

/// Height the widget needs to fit the ticks and both cursors.
pub fn preferred_height(
    padding: &Padding,
    cursor_gap: f64,
    metrics: &dyn TextMetrics,
) -> f64 {
    let length = tick_length(&metrics.measure(&sample_label()));
    padding.vertical()
        + length
        + cursor_gap * 2.0
        + MIN_HEIGHT_SLACK
        + (length * SIN60 * 2.0).floor()
}

impl Layout {
    /// Returns `None` for a degenerate view, e.g. before the first size allocation.
    pub fn resolve(
        width: f64,
        height: f64,
        padding: &Padding,
        cursor_gap: f64,
        metrics: &dyn TextMetrics,
    ) -> Option<Self> {
        let view = Rect::from_size(width, height);
        let bounds = Rect::new(
            padding.left,
            padding.top,
            width - padding.right,
            height - padding.bottom,
        );
        if view.is_empty() || bounds.is_empty() {
            return None;
        }

        let sample = metrics.measure(&sample_label());
        let tick_length = tick_length(&sample);

        let cursor_edge = (tick_length * 4.0 / 5.0).floor();
        let cursor_height = (cursor_edge * SIN60).floor();
        let y = ((bounds.height() - cursor_edge - cursor_height * 2.0 - cursor_gap * 2.0) / 2.0)
            .floor();

        let left = bounds.center_x() - sample.width / 2.0;
        let top = bounds.center_y() - sample.height / 2.0;
        let text_rect = Rect::new(
            left - TEXT_PAD_X,
            top - TEXT_PAD_Y,
            left + sample.width + TEXT_PAD_X,
            top + sample.height + TEXT_PAD_Y,
        );

        let layout = Self {
            view,
            bounds,
            projection: Projection::for_bounds(&bounds),
            tick_length,
            cursor_edge,
            top_anchor: Point::new(bounds.center_x(), bounds.top + y),
            bottom_anchor: Point::new(bounds.center_x(), bounds.bottom - y),
            text_rect,
            label_baseline: bounds.top + (bounds.height() - sample.height) / 2.0 + sample.ascent,
            masks: Self::masks(&view, &bounds),
        };
        log::debug!(
            "Resolved layout: bounds={:?}, radius={:.2}, tick_length={}",
            layout.bounds,
            layout.projection.radius,
            layout.tick_length
        );
        Some(layout)
    }

    fn masks(view: &Rect, bounds: &Rect) -> Masks {
        let fade = bounds.width() * EDGE_FADE_FRACTION;
        let cy = bounds.center_y();
        let left = bounds.span_x(bounds.left, bounds.left + fade);
        let right = bounds.span_x(bounds.right - fade, bounds.right);
        Masks {
            left: GradientRect {
                rect: left,
                from: Point::new(left.left, cy),
                to: Point::new(left.right, cy),
            },
            // fades from the outer edge toward the center
            right: GradientRect {
                rect: right,
                from: Point::new(right.right, cy),
                to: Point::new(right.left, cy),
            },
            vignette: GradientRect {
                rect: *view,
                from: Point::new(bounds.left, cy),
                to: Point::new(bounds.right, cy),
            },
        }
    }

    pub fn cursors(&self) -> CursorPair {
        CursorPair::new(self.top_anchor, self.bottom_anchor, self.cursor_edge)
    }

    pub fn draw_width(&self) -> f64 {
        self.bounds.width()
    }

    /// Left edge that horizontally centers `label`.
    pub fn label_x(&self, label: &DegreeLabel, metrics: &dyn TextMetrics) -> f64 {
        self.bounds.center_x() - metrics.measure(label).width / 2.0
    }

    /// Region between the center and the current offset, highlighted on the ticks.
    pub fn progress_rect(&self, total_offset_x: f64) -> Rect {
        let cx = self.bounds.center_x();
        self.view.span_x(cx, cx + total_offset_x)
    }
}
