use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use eframe::egui::Pos2;

use crate::cli::{GeometryArgs, ThemeName};
use nodewire::color::{derive_color, to_hex};
use nodewire::config::Config;
use nodewire::geometry::{ConnectionGeometry, ConnectionState, build_curve};
use nodewire::hit::build_hit_region;
use nodewire::paint::CommandRecorder;
use nodewire::renderer::ConnectionRenderer;
use nodewire::style::StyleConfig;

pub struct RenderRequest {
    pub geometry: GeometryArgs,
    pub type_id: String,
    pub selected: bool,
    pub hovered: bool,
    pub requires_port: bool,
    pub debug_overlay: bool,
    pub theme: Option<ThemeName>,
    pub style: Option<PathBuf>,
}

fn build_geometry(args: GeometryArgs) -> ConnectionGeometry {
    match (args.control1, args.control2) {
        (Some(c1), Some(c2)) => ConnectionGeometry::with_controls(args.source, args.sink, c1, c2),
        _ => ConnectionGeometry::new(args.source, args.sink),
    }
}

pub fn color(type_ids: &[String]) {
    let width = type_ids.iter().map(|id| id.len()).max().unwrap_or(0).max(4);
    for id in type_ids {
        let color = derive_color(id);
        let label = if id.is_empty() { "\"\"" } else { id.as_str() };
        println!(
            "{label:<width$}  {}  {}",
            to_hex(color),
            "    ".on_truecolor(color.r(), color.g(), color.b())
        );
    }
}

pub fn render(req: RenderRequest) -> Result<()> {
    let config = Config::load_or_default();
    let style = match (&req.style, req.theme) {
        (Some(path), _) => StyleConfig::load_from(path)?,
        (None, Some(theme)) => StyleConfig::from_name(theme.as_str()),
        (None, None) => config.resolved_style()?,
    };

    let mut geometry = build_geometry(req.geometry);
    geometry.hovered = req.hovered;
    let state = ConnectionState {
        requires_port: req.requires_port,
    };
    let renderer = ConnectionRenderer::new(req.debug_overlay || config.debug_overlay());

    let mut recorder = CommandRecorder::new();
    renderer.render(
        &mut recorder,
        &geometry,
        &state,
        &req.type_id,
        &style,
        req.selected,
    );

    eprintln!(
        "{} {} command(s), style '{}'",
        "Rendered".green().bold(),
        recorder.commands().len(),
        style.name
    );
    for (i, command) in recorder.commands().iter().enumerate() {
        println!("{:>3}  {command}", i + 1);
    }
    Ok(())
}

pub fn hit(
    geometry: GeometryArgs,
    point: Pos2,
    width: Option<f32>,
    segments: Option<u32>,
) -> Result<()> {
    let config = Config::load_or_default();
    let width = width.unwrap_or_else(|| config.hit_width());
    if !width.is_finite() || width <= 0.0 {
        anyhow::bail!("Invalid width: {width}. Must be a positive number.");
    }
    let segments = segments.map_or_else(|| config.segments(), |n| n as usize);

    let geometry = build_geometry(geometry);
    let polyline = build_curve(&geometry).approximate_polyline(segments);
    let region = build_hit_region(&polyline, width);

    if region.contains(point) {
        println!("{} ({}, {})", "hit".green().bold(), point.x, point.y);
    } else {
        println!("{} ({}, {})", "miss".red().bold(), point.x, point.y);
    }
    tracing::debug!(
        polygons = region.polygons().len(),
        bounds = ?region.bounding_rect(),
        "hit region"
    );
    Ok(())
}
