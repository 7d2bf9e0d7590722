//! cairo implementations of the drawing surface and text metrics the dial renders through.

use crate::config::FontConfig;
use cairo::{Context, FontSlant, FontWeight, Format, ImageSurface, LinearGradient, Operator};
use palette::Srgba;
use tickwheel::cursor::Triangle;
use tickwheel::geometry::{Point, Rect};
use tickwheel::render::GradientStop;
use tickwheel::{Surface, TextExtent, TextMetrics};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn select_font(cr: &Context, font: &FontConfig) {
    cr.select_font_face(&font.family, FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(font.size);
}

fn rectangle(cr: &Context, rect: &Rect) {
    cr.rectangle(rect.left, rect.top, rect.width(), rect.height());
}

pub struct CairoSurface<'a> {
    cr: &'a Context,
    font: &'a FontConfig,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, font: &'a FontConfig) -> Self {
        Self { cr, font }
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn fill_rect(&mut self, rect: &Rect, color: Srgba<f64>) -> Result<(), cairo::Error> {
        set_color(self.cr, color);
        rectangle(self.cr, rect);
        self.cr.fill()
    }

    fn fill_gradient(
        &mut self,
        rect: &Rect,
        from: Point,
        to: Point,
        stops: &[GradientStop],
    ) -> Result<(), cairo::Error> {
        let gradient = LinearGradient::new(from.x, from.y, to.x, to.y);
        for (offset, color) in stops {
            let (r, g, b, a) = color.into_components();
            gradient.add_color_stop_rgba(*offset, r, g, b, a);
        }
        self.cr.set_source(&gradient)?;
        rectangle(self.cr, rect);
        self.cr.fill()
    }

    fn stroke_segments(
        &mut self,
        segments: &mut dyn Iterator<Item = (Point, Point)>,
        color: Srgba<f64>,
        width: f64,
    ) -> Result<(), cairo::Error> {
        set_color(self.cr, color);
        self.cr.set_line_width(width);
        for (start, end) in segments {
            self.cr.move_to(start.x, start.y);
            self.cr.line_to(end.x, end.y);
        }
        self.cr.stroke()
    }

    fn fill_triangle(&mut self, triangle: &Triangle, color: Srgba<f64>) -> Result<(), cairo::Error> {
        let [a, b, c] = triangle.points;
        set_color(self.cr, color);
        self.cr.move_to(a.x, a.y);
        self.cr.line_to(b.x, b.y);
        self.cr.line_to(c.x, c.y);
        self.cr.close_path();
        self.cr.fill()
    }

    fn push_layer(&mut self) -> Result<(), cairo::Error> {
        self.cr.push_group();
        Ok(())
    }

    fn fill_rect_atop(&mut self, rect: &Rect, color: Srgba<f64>) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.set_operator(Operator::Atop);
        self.fill_rect(rect, color)?;
        self.cr.restore()
    }

    fn pop_layer(&mut self) -> Result<(), cairo::Error> {
        self.cr.pop_group_to_source()?;
        self.cr.paint()
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Srgba<f64>,
        clip: &Rect,
    ) -> Result<(), cairo::Error> {
        self.cr.save()?;
        rectangle(self.cr, clip);
        self.cr.clip();
        set_color(self.cr, color);
        select_font(self.cr, self.font);
        self.cr.move_to(origin.x, origin.y);
        self.cr.show_text(text)?;
        self.cr.restore()
    }
}

/// Measures text on a private 1x1 surface configured with the same font as the frames.
pub struct CairoMetrics {
    cr: Context,
}

impl CairoMetrics {
    pub fn new(font: &FontConfig) -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)?;
        let cr = Context::new(&surface)?;
        select_font(&cr, font);
        Ok(Self { cr })
    }
}

impl TextMetrics for CairoMetrics {
    fn measure(&self, text: &str) -> TextExtent {
        match (self.cr.text_extents(text), self.cr.font_extents()) {
            (Ok(text_ext), Ok(font_ext)) => TextExtent {
                width: text_ext.x_advance(),
                height: font_ext.ascent() + font_ext.descent(),
                ascent: font_ext.ascent(),
            },
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Failed to measure '{}': {}", text, e);
                TextExtent::default()
            }
        }
    }
}
