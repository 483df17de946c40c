use eframe::egui::Color32;

use super::*;
use crate::hit::hit_region_for;
use crate::paint::Brush;

#[test]
fn overlay_off_emits_no_debug_commands() {
    let cmds = render(ConnectionRenderer::default(), &geometry(false), &state(false), "Integer", false);
    assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
    assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Polygon { .. })));
}

#[test]
fn overlay_draws_control_polygon_first() {
    let geom = geometry(false);
    let cmds = render(ConnectionRenderer::new(true), &geom, &state(false), "Integer", false);

    let lines: Vec<(Pos2, Pos2)> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { from, to, pen } => {
                assert_eq!(pen.color, Color32::RED);
                Some((*from, *to))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        lines,
        vec![
            (geom.source, geom.controls.0),
            (geom.controls.0, geom.controls.1),
            (geom.controls.1, geom.sink),
        ]
    );
    assert!(matches!(cmds[0], DrawCommand::Line { .. }));
}

#[test]
fn overlay_marks_control_points() {
    let geom = geometry(false);
    let cmds = render(ConnectionRenderer::new(true), &geom, &state(false), "Integer", false);
    let markers = ellipses(&cmds);

    // Two control markers, then the two endpoint markers.
    assert_eq!(markers.len(), 4);
    match markers[0] {
        DrawCommand::FillEllipse {
            center,
            radius_x,
            brush,
            ..
        } => {
            assert_eq!(*center, geom.controls.0);
            assert_eq!(*radius_x, 4.0);
            assert_eq!(*brush, Brush::Solid(Color32::RED));
        }
        _ => unreachable!(),
    }
}

#[test]
fn overlay_strokes_raw_curve_before_body() {
    let cmds = render(ConnectionRenderer::new(true), &geometry(false), &state(false), "Integer", false);
    let paths = strokes(&cmds);
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].pen().color, Color32::RED);
    assert_eq!(paths[1].pen().color, crate::color::derive_color("Integer"));
}

#[test]
fn overlay_outlines_hit_region() {
    let geom = geometry(false);
    let cmds = render(ConnectionRenderer::new(true), &geom, &state(false), "Integer", false);
    let polygons: Vec<&Vec<Pos2>> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polygon { points, brush, .. } => {
                assert_eq!(*brush, Brush::None);
                Some(points)
            }
            _ => None,
        })
        .collect();

    let region = hit_region_for(&geom);
    assert_eq!(polygons.len(), region.polygons().len());
    assert_eq!(polygons[0], &region.polygons()[0]);
}
