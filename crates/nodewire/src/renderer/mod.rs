#[cfg(test)]
mod tests;

use eframe::egui::{Color32, Pos2};

use crate::color::derive_color;
use crate::geometry::{ConnectionGeometry, ConnectionState, DEFAULT_SEGMENTS, build_curve};
use crate::hit::{DEFAULT_HIT_WIDTH, build_hit_region};
use crate::paint::{Brush, Pen, RenderTarget};
use crate::style::StyleConfig;

/// Radius of the control-point markers in the debug overlay.
const DEBUG_MARKER_RADIUS: f32 = 4.0;

/// A connection as seen from the renderer's side.
pub trait Connection {
    /// Identifier of the data type flowing through the connection.
    fn data_type(&self) -> &str;
    fn connection_geometry(&self) -> &ConnectionGeometry;
    fn connection_state(&self) -> &ConnectionState;
    /// Selection as tracked by whatever owns the scene.
    fn is_selected(&self) -> bool;
}

/// Paints connections onto a [`RenderTarget`].
///
/// Holds no per-frame state: the same inputs always produce the same command
/// sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionRenderer {
    /// Also draw control polygon, control points, raw curve and hit region.
    pub debug_overlay: bool,
}

impl ConnectionRenderer {
    pub fn new(debug_overlay: bool) -> Self {
        Self { debug_overlay }
    }

    /// Draw one connection.
    ///
    /// Order is fixed: debug overlay (if enabled), halo (when hovered or
    /// selected), body line, then the two endpoint markers. Selection wins
    /// over construction when picking the body pen.
    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        geometry: &ConnectionGeometry,
        state: &ConnectionState,
        type_id: &str,
        style: &StyleConfig,
        selected: bool,
    ) {
        let curve = build_curve(geometry);
        let base_color = derive_color(type_id);

        if curve.is_finite() {
            if self.debug_overlay {
                self.draw_debug_overlay(target, geometry);
            }

            if geometry.hovered || selected {
                let halo_color = if selected {
                    style.selected_halo_color
                } else {
                    style.hovered_color
                };
                target.set_pen(Pen::solid(halo_color, 2.0 * style.line_width));
                target.set_brush(Brush::None);
                target.stroke_path(&curve);
            }

            target.set_pen(body_pen(state, style, selected, base_color));
            target.set_brush(Brush::None);
            target.stroke_path(&curve);
        } else {
            tracing::warn!(?geometry, "skipping connection with non-finite geometry");
        }

        let point_radius = style.point_diameter / 2.0;
        target.set_pen(Pen::cosmetic(style.construction_color));
        target.set_brush(Brush::Solid(style.construction_color));
        for center in [geometry.source, geometry.sink] {
            if center.is_finite() {
                target.fill_ellipse(center, point_radius, point_radius);
            }
        }

        tracing::trace!(
            type_id,
            selected,
            hovered = geometry.hovered,
            requires_port = state.requires_port,
            "rendered connection"
        );
    }

    /// Draw a connection described by a [`Connection`] collaborator.
    pub fn render_connection(
        &self,
        target: &mut dyn RenderTarget,
        connection: &impl Connection,
        style: &StyleConfig,
    ) {
        self.render(
            target,
            connection.connection_geometry(),
            connection.connection_state(),
            connection.data_type(),
            style,
            connection.is_selected(),
        );
    }

    fn draw_debug_overlay(&self, target: &mut dyn RenderTarget, geometry: &ConnectionGeometry) {
        let (c1, c2) = geometry.controls;

        target.set_pen(Pen::cosmetic(Color32::RED));
        target.set_brush(Brush::Solid(Color32::RED));
        target.draw_line(geometry.source, c1);
        target.draw_line(c1, c2);
        target.draw_line(c2, geometry.sink);
        target.fill_ellipse(c1, DEBUG_MARKER_RADIUS, DEBUG_MARKER_RADIUS);
        target.fill_ellipse(c2, DEBUG_MARKER_RADIUS, DEBUG_MARKER_RADIUS);

        target.set_brush(Brush::None);
        let curve = build_curve(geometry);
        target.stroke_path(&curve);

        let polyline: Vec<Pos2> = curve.approximate_polyline(DEFAULT_SEGMENTS);
        for polygon in build_hit_region(&polyline, DEFAULT_HIT_WIDTH).polygons() {
            target.draw_polygon(polygon);
        }
    }
}

/// Pen for the main line of a connection.
pub fn body_pen(
    state: &ConnectionState,
    style: &StyleConfig,
    selected: bool,
    base_color: Color32,
) -> Pen {
    if selected {
        Pen::solid(style.selected_color, style.line_width)
    } else if state.requires_port {
        Pen::dashed(style.construction_color, style.construction_line_width)
    } else {
        Pen::solid(base_color, style.line_width)
    }
}
