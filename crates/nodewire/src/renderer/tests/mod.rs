mod debug_overlay;
mod determinism;

use eframe::egui::Pos2;

use super::{Connection, ConnectionRenderer};
use crate::geometry::{ConnectionGeometry, ConnectionState};
use crate::paint::{CommandRecorder, DrawCommand, PenStyle};
use crate::style::StyleConfig;

/// Helper to create the straight left-to-right test connection.
fn geometry(hovered: bool) -> ConnectionGeometry {
    let mut geom = ConnectionGeometry::with_controls(
        Pos2::new(0.0, 0.0),
        Pos2::new(100.0, 0.0),
        Pos2::new(33.0, 0.0),
        Pos2::new(66.0, 0.0),
    );
    geom.hovered = hovered;
    geom
}

fn state(requires_port: bool) -> ConnectionState {
    ConnectionState { requires_port }
}

/// Render once into a fresh recorder and return the commands.
fn render(
    renderer: ConnectionRenderer,
    geom: &ConnectionGeometry,
    st: &ConnectionState,
    type_id: &str,
    selected: bool,
) -> Vec<DrawCommand> {
    let mut rec = CommandRecorder::new();
    renderer.render(&mut rec, geom, st, type_id, &StyleConfig::dark(), selected);
    rec.into_commands()
}

/// All path strokes, in order.
fn strokes(commands: &[DrawCommand]) -> Vec<&DrawCommand> {
    commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokePath { .. }))
        .collect()
}

/// All ellipses, in order.
fn ellipses(commands: &[DrawCommand]) -> Vec<&DrawCommand> {
    commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillEllipse { .. }))
        .collect()
}

/// Assert the body stroke is the last path in the list and return its pen style.
fn body_style(commands: &[DrawCommand]) -> PenStyle {
    strokes(commands)
        .last()
        .map(|c| c.pen().style)
        .unwrap_or_else(|| panic!("no body stroke in {commands:?}"))
}

/// Minimal connection collaborator.
struct TestConnection {
    type_id: String,
    geometry: ConnectionGeometry,
    state: ConnectionState,
    selected: bool,
}

impl Connection for TestConnection {
    fn data_type(&self) -> &str {
        &self.type_id
    }

    fn connection_geometry(&self) -> &ConnectionGeometry {
        &self.geometry
    }

    fn connection_state(&self) -> &ConnectionState {
        &self.state
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}
