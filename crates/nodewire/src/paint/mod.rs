pub mod egui_target;

use std::fmt;

use eframe::egui::{Color32, Pos2};

use crate::color::to_hex;
use crate::geometry::CubicCurve;

pub use egui_target::EguiTarget;

/// Line pattern of a pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenStyle {
    Solid,
    Dash,
}

/// Outline settings for subsequent draw calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color32,
    pub width: f32,
    pub style: PenStyle,
}

impl Pen {
    pub fn solid(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            style: PenStyle::Solid,
        }
    }

    pub fn dashed(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            style: PenStyle::Dash,
        }
    }

    /// Hairline pen, the default outline for markers.
    pub fn cosmetic(color: Color32) -> Self {
        Self::solid(color, 1.0)
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::cosmetic(Color32::BLACK)
    }
}

/// Fill settings for subsequent draw calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Brush {
    #[default]
    None,
    Solid(Color32),
}

/// Drawing capability the connection renderer paints through.
///
/// Mirrors a stateful 2D painter: pen and brush are set first, and every
/// draw call uses whatever was set last. Paths and lines are only ever
/// stroked; ellipses and polygons are filled with the brush and outlined with
/// the pen.
pub trait RenderTarget {
    fn set_pen(&mut self, pen: Pen);
    fn set_brush(&mut self, brush: Brush);
    fn stroke_path(&mut self, curve: &CubicCurve);
    fn fill_ellipse(&mut self, center: Pos2, radius_x: f32, radius_y: f32);
    fn draw_line(&mut self, from: Pos2, to: Pos2);
    fn draw_polygon(&mut self, points: &[Pos2]);
}

/// One draw call together with the pen and brush it was issued with.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    StrokePath {
        curve: CubicCurve,
        pen: Pen,
    },
    FillEllipse {
        center: Pos2,
        radius_x: f32,
        radius_y: f32,
        pen: Pen,
        brush: Brush,
    },
    Line {
        from: Pos2,
        to: Pos2,
        pen: Pen,
    },
    Polygon {
        points: Vec<Pos2>,
        pen: Pen,
        brush: Brush,
    },
}

impl DrawCommand {
    pub fn pen(&self) -> Pen {
        match self {
            Self::StrokePath { pen, .. }
            | Self::FillEllipse { pen, .. }
            | Self::Line { pen, .. }
            | Self::Polygon { pen, .. } => *pen,
        }
    }
}

/// Render target that keeps the commands instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pen: Pen,
    brush: Brush,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderTarget for CommandRecorder {
    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn stroke_path(&mut self, curve: &CubicCurve) {
        self.commands.push(DrawCommand::StrokePath {
            curve: *curve,
            pen: self.pen,
        });
    }

    fn fill_ellipse(&mut self, center: Pos2, radius_x: f32, radius_y: f32) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radius_x,
            radius_y,
            pen: self.pen,
            brush: self.brush,
        });
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            pen: self.pen,
        });
    }

    fn draw_polygon(&mut self, points: &[Pos2]) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            pen: self.pen,
            brush: self.brush,
        });
    }
}

impl fmt::Display for Pen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.style {
            PenStyle::Solid => "solid",
            PenStyle::Dash => "dash",
        };
        write!(f, "pen({} {}px {})", to_hex(self.color), self.width, style)
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brush::None => write!(f, "brush(none)"),
            Brush::Solid(color) => write!(f, "brush({})", to_hex(*color)),
        }
    }
}

fn fmt_point(p: Pos2) -> String {
    format!("({},{})", p.x, p.y)
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrokePath { curve, pen } => {
                let [p0, p1, p2, p3] = curve.points().map(fmt_point);
                write!(f, "stroke-path {p0} {p1} {p2} {p3} {pen}")
            }
            Self::FillEllipse {
                center,
                radius_x,
                radius_y,
                pen,
                brush,
            } => write!(
                f,
                "fill-ellipse {} r={}x{} {pen} {brush}",
                fmt_point(*center),
                radius_x,
                radius_y
            ),
            Self::Line { from, to, pen } => {
                write!(f, "line {} {} {pen}", fmt_point(*from), fmt_point(*to))
            }
            Self::Polygon { points, pen, brush } => {
                write!(f, "polygon n={} {pen} {brush}", points.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> CubicCurve {
        CubicCurve {
            start: Pos2::new(0.0, 0.0),
            control1: Pos2::new(10.0, 0.0),
            control2: Pos2::new(20.0, 0.0),
            end: Pos2::new(30.0, 0.0),
        }
    }

    #[test]
    fn test_recorder_snapshots_current_pen_and_brush() {
        let mut rec = CommandRecorder::new();
        rec.set_pen(Pen::solid(Color32::RED, 3.0));
        rec.stroke_path(&curve());
        rec.set_pen(Pen::dashed(Color32::GRAY, 2.0));
        rec.set_brush(Brush::Solid(Color32::GRAY));
        rec.fill_ellipse(Pos2::new(1.0, 2.0), 5.0, 5.0);

        let cmds = rec.commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].pen(), Pen::solid(Color32::RED, 3.0));
        match &cmds[1] {
            DrawCommand::FillEllipse { pen, brush, .. } => {
                assert_eq!(pen.style, PenStyle::Dash);
                assert_eq!(*brush, Brush::Solid(Color32::GRAY));
            }
            other => panic!("unexpected command {other}"),
        }
    }

    #[test]
    fn test_recorder_defaults() {
        let mut rec = CommandRecorder::new();
        rec.draw_polygon(&[Pos2::ZERO, Pos2::new(1.0, 0.0), Pos2::new(0.0, 1.0)]);
        match &rec.commands()[0] {
            DrawCommand::Polygon { points, pen, brush } => {
                assert_eq!(points.len(), 3);
                assert_eq!(*pen, Pen::default());
                assert_eq!(*brush, Brush::None);
            }
            other => panic!("unexpected command {other}"),
        }
    }

    #[test]
    fn test_display_dump() {
        let cmd = DrawCommand::StrokePath {
            curve: curve(),
            pen: Pen::dashed(Color32::from_rgb(0xa0, 0xa0, 0xa4), 2.0),
        };
        assert_eq!(
            cmd.to_string(),
            "stroke-path (0,0) (10,0) (20,0) (30,0) pen(#a0a0a4 2px dash)"
        );
    }
}
