use crate::cursor::Triangle;
use crate::geometry::{Point, Rect};
use crate::layout::GradientRect;
use crate::theme::MASK_STOPS;
use crate::wheel::Wheel;
use palette::Srgba;

pub const TICK_STROKE_WIDTH: f64 = 3.0;

pub type GradientStop = (f64, Srgba<f64>);

/// Drawing capability of the host toolkit.
pub trait Surface {
    type Error;

    fn fill_rect(&mut self, rect: &Rect, color: Srgba<f64>) -> Result<(), Self::Error>;

    /// Fills `rect` with a linear gradient running from `from` to `to`; stop offsets are in
    /// `[0, 1]` along that line.
    fn fill_gradient(
        &mut self,
        rect: &Rect,
        from: Point,
        to: Point,
        stops: &[GradientStop],
    ) -> Result<(), Self::Error>;

    fn stroke_segments(
        &mut self,
        segments: &mut dyn Iterator<Item = (Point, Point)>,
        color: Srgba<f64>,
        width: f64,
    ) -> Result<(), Self::Error>;

    fn fill_triangle(&mut self, triangle: &Triangle, color: Srgba<f64>) -> Result<(), Self::Error>;

    /// Starts an offscreen layer; everything up to [`Surface::pop_layer`] is composited at once.
    fn push_layer(&mut self) -> Result<(), Self::Error>;

    /// Paints `rect` only where the current layer already has content.
    fn fill_rect_atop(&mut self, rect: &Rect, color: Srgba<f64>) -> Result<(), Self::Error>;

    fn pop_layer(&mut self) -> Result<(), Self::Error>;

    /// Draws `text` with its baseline starting at `origin`, clipped to `clip`.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Srgba<f64>,
        clip: &Rect,
    ) -> Result<(), Self::Error>;
}

fn fill_mask<S: Surface>(
    surface: &mut S,
    mask: &GradientRect,
    stops: &[GradientStop],
) -> Result<(), S::Error> {
    surface.fill_gradient(&mask.rect, mask.from, mask.to, stops)
}

/// Draws one frame from the wheel's current state. Call [`Wheel::prepare_frame`] first.
pub fn render<S: Surface>(surface: &mut S, wheel: &Wheel) -> Result<(), S::Error> {
    let colors = wheel.colors();
    let Some(layout) = wheel.layout() else {
        return Ok(());
    };
    surface.fill_rect(&layout.view, colors.background)?;

    surface.push_layer()?;
    surface.stroke_segments(
        &mut wheel.ticks().segments(&layout.bounds),
        colors.tick,
        TICK_STROKE_WIDTH,
    )?;
    surface.fill_rect_atop(&layout.progress_rect(wheel.total_offset_x()), colors.accent)?;
    surface.pop_layer()?;

    let edge = [(0.0, colors.edge_start), (1.0, colors.edge_end)];
    fill_mask(surface, &layout.masks.left, &edge)?;
    fill_mask(surface, &layout.masks.right, &edge)?;
    let mut vignette = [(0.0, colors.mask[0]); MASK_STOPS];
    for (i, stop) in vignette.iter_mut().enumerate() {
        *stop = (i as f64 / (MASK_STOPS - 1) as f64, colors.mask[i]);
    }
    fill_mask(surface, &layout.masks.vignette, &vignette)?;

    surface.fill_rect(&layout.text_rect, colors.text_background)?;
    surface.draw_text(
        wheel.label(),
        wheel.label_origin(),
        colors.text,
        &layout.text_rect,
    )?;

    if let Some(cursors) = wheel.cursors() {
        surface.fill_triangle(&cursors.top.shape(), colors.accent)?;
        surface.fill_triangle(&cursors.bottom.shape(), colors.cursor)?;
    }
    Ok(())
}
