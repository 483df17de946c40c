use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{self, Color32, Pos2, Shape, Stroke, Vec2};

use super::{Brush, Pen, PenStyle, RenderTarget};
use crate::geometry::{CubicCurve, polyline_length, polyline_point_at_distance};

/// Samples used when a dashed curve has to be flattened before cutting.
const DASH_SAMPLES: usize = 48;

/// Upper bound on the dashes drawn for one path.
const MAX_DASHES: usize = 4096;

/// Render target backed by an egui painter.
pub struct EguiTarget<'a> {
    painter: &'a egui::Painter,
    pen: Pen,
    brush: Brush,
}

impl<'a> EguiTarget<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        Self {
            painter,
            pen: Pen::default(),
            brush: Brush::None,
        }
    }

    fn stroke(&self) -> Stroke {
        Stroke::new(self.pen.width, self.pen.color)
    }

    fn fill(&self) -> Color32 {
        match self.brush {
            Brush::None => Color32::TRANSPARENT,
            Brush::Solid(color) => color,
        }
    }

    /// Draw a dashed polyline across multiple segments with continuity.
    ///
    /// Dash and gap scale with the pen width, four and two widths long. A
    /// polyline too long to measure in f32 is drawn solid.
    fn draw_dashed_polyline(&self, points: &[Pos2]) {
        let total_len = polyline_length(points);
        let stroke = self.stroke();
        if !total_len.is_finite() {
            tracing::debug!(total_len, "dashed path too long to measure, drawing solid");
            self.painter.add(Shape::line(points.to_vec(), stroke));
            return;
        }

        for (from, to) in dash_ranges(total_len, self.pen.width) {
            self.painter.add(Shape::line(dash_points(points, from, to), stroke));
        }
    }
}

/// Distance ranges of the dashes along a path of length `total_len`.
///
/// At most [`MAX_DASHES`] ranges are produced; longer paths stretch dash and
/// gap evenly so the pattern still spans the whole length.
fn dash_ranges(total_len: f32, pen_width: f32) -> Vec<(f32, f32)> {
    if !total_len.is_finite() || total_len <= 0.0 {
        return Vec::new();
    }
    let width = if pen_width.is_finite() {
        pen_width.max(1.0)
    } else {
        1.0
    };
    let mut dash_len = 4.0 * width;
    let mut gap_len = 2.0 * width;

    let needed = (total_len / (dash_len + gap_len)).ceil();
    if needed > MAX_DASHES as f32 {
        let stretch = needed / MAX_DASHES as f32;
        dash_len *= stretch;
        gap_len *= stretch;
    }
    let period = dash_len + gap_len;

    (0..MAX_DASHES)
        .map(|i| i as f32 * period)
        .take_while(|&from| from < total_len)
        .map(|from| (from, (from + dash_len).min(total_len)))
        .collect()
}

/// Polyline running from distance `from` to distance `to`, keeping the
/// interior vertices so dashes follow the curve.
fn dash_points(points: &[Pos2], from: f32, to: f32) -> Vec<Pos2> {
    let mut dash = vec![polyline_point_at_distance(points, from)];
    let mut cumulative = 0.0;
    for pair in points.windows(2) {
        cumulative += (pair[1] - pair[0]).length();
        if cumulative > from && cumulative < to {
            dash.push(pair[1]);
        }
    }
    dash.push(polyline_point_at_distance(points, to));
    dash
}

impl RenderTarget for EguiTarget<'_> {
    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn stroke_path(&mut self, curve: &CubicCurve) {
        match self.pen.style {
            PenStyle::Solid => {
                let shape = CubicBezierShape::from_points_stroke(
                    curve.points(),
                    false,
                    Color32::TRANSPARENT,
                    self.stroke(),
                );
                self.painter.add(shape);
            }
            PenStyle::Dash => {
                let points = curve.approximate_polyline(DASH_SAMPLES);
                self.draw_dashed_polyline(&points);
            }
        }
    }

    fn fill_ellipse(&mut self, center: Pos2, radius_x: f32, radius_y: f32) {
        let radius = Vec2::new(radius_x, radius_y);
        self.painter.add(Shape::ellipse_filled(center, radius, self.fill()));
        self.painter.add(Shape::ellipse_stroke(center, radius, self.stroke()));
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2) {
        self.painter.line_segment([from, to], self.stroke());
    }

    fn draw_polygon(&mut self, points: &[Pos2]) {
        self.painter.add(Shape::convex_polygon(
            points.to_vec(),
            self.fill(),
            self.stroke(),
        ));
    }
}
