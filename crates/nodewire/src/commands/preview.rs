use eframe::egui::{self, Pos2};

use crate::cli::ThemeName;
use nodewire::color::{derive_color, to_hex};
use nodewire::config::Config;
use nodewire::geometry::{ConnectionGeometry, ConnectionState};
use nodewire::hit::{HitRegion, build_hit_region};
use nodewire::paint::EguiTarget;
use nodewire::renderer::{Connection, ConnectionRenderer};
use nodewire::style::StyleConfig;

/// Pointer distance at which an endpoint can be grabbed.
const GRAB_RADIUS: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Endpoint {
    Source,
    Sink,
}

/// The single connection shown in the preview.
struct PreviewConnection {
    type_id: String,
    geometry: ConnectionGeometry,
    state: ConnectionState,
    selected: bool,
}

impl Connection for PreviewConnection {
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

struct PreviewApp {
    connection: PreviewConnection,
    config: Config,
    style: StyleConfig,
    renderer: ConnectionRenderer,
    segments: usize,
    hit_width: f32,
    hit_region: HitRegion,
    /// Endpoint being dragged, if any
    dragging: Option<Endpoint>,
    /// Geometry was laid out for the first frame
    placed: bool,
}

impl PreviewApp {
    fn new(style: StyleConfig, config: Config) -> Self {
        let geometry = ConnectionGeometry::new(Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0));
        let mut app = Self {
            connection: PreviewConnection {
                type_id: "Integer".to_string(),
                geometry,
                state: ConnectionState::default(),
                selected: false,
            },
            style,
            renderer: ConnectionRenderer::new(config.debug_overlay()),
            segments: config.segments(),
            hit_width: config.hit_width(),
            config,
            hit_region: HitRegion::empty(),
            dragging: None,
            placed: false,
        };
        app.rebuild_hit_region();
        app
    }

    fn rebuild_hit_region(&mut self) {
        let curve = nodewire::build_curve(&self.connection.geometry);
        let polyline = curve.approximate_polyline(self.segments);
        self.hit_region = build_hit_region(&polyline, self.hit_width);
    }

    fn move_endpoint(&mut self, endpoint: Endpoint, pos: Pos2) {
        let geom = &mut self.connection.geometry;
        let (source, sink) = match endpoint {
            Endpoint::Source => (pos, geom.sink),
            Endpoint::Sink => (geom.source, pos),
        };
        geom.set_endpoints(source, sink);
        self.rebuild_hit_region();
    }

    fn endpoint_at(&self, pos: Pos2) -> Option<Endpoint> {
        let geom = &self.connection.geometry;
        let grab = GRAB_RADIUS.max(self.style.point_diameter);
        if geom.sink.distance(pos) <= grab {
            Some(Endpoint::Sink)
        } else if geom.source.distance(pos) <= grab {
            Some(Endpoint::Source)
        } else {
            None
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::C) {
                self.connection.state.requires_port = !self.connection.state.requires_port;
                tracing::debug!(
                    requires_port = self.connection.state.requires_port,
                    "toggled construction"
                );
            }
            if i.key_pressed(egui::Key::D) {
                self.renderer.debug_overlay = !self.renderer.debug_overlay;
            }
            if i.key_pressed(egui::Key::Escape) {
                self.connection.selected = false;
            }
        });
        if ctx.input(|i| i.key_pressed(egui::Key::T)) {
            self.toggle_theme();
        }
    }

    /// Switch to the other preset, keeping the configured style overrides.
    fn toggle_theme(&mut self) {
        let preset = self.style.toggled();
        self.style = self.config.style_for(&preset.name).unwrap_or_else(|e| {
            tracing::warn!("ignoring style overrides: {e:#}");
            preset
        });
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Type:");
                ui.text_edit_singleline(&mut self.connection.type_id);
                let color = derive_color(&self.connection.type_id);
                ui.colored_label(color, to_hex(color));
                ui.separator();
                ui.checkbox(&mut self.connection.state.requires_port, "Construction (C)");
                ui.checkbox(&mut self.renderer.debug_overlay, "Debug overlay (D)");
                ui.checkbox(&mut self.connection.selected, "Selected");
                ui.separator();
                ui.label(format!("Style: {} (T)", self.style.name));
            });
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.draw_toolbar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            if !self.placed {
                let source = rect.left_center() + egui::vec2(rect.width() * 0.2, 0.0);
                let sink = rect.right_center() - egui::vec2(rect.width() * 0.2, -60.0);
                self.connection.geometry.set_endpoints(source, sink);
                self.rebuild_hit_region();
                self.placed = true;
            }

            if response.drag_started() {
                self.dragging = response
                    .interact_pointer_pos()
                    .and_then(|pos| self.endpoint_at(pos));
            }
            if response.dragged() {
                if let (Some(endpoint), Some(pos)) =
                    (self.dragging, response.interact_pointer_pos())
                {
                    self.move_endpoint(endpoint, rect.clamp(pos));
                }
            }
            if response.drag_stopped() {
                self.dragging = None;
            }

            if response.clicked() {
                let hit = response
                    .interact_pointer_pos()
                    .is_some_and(|pos| self.hit_region.contains(pos));
                self.connection.selected = hit && !self.connection.selected;
            }

            self.connection.geometry.hovered = self.dragging.is_none()
                && response
                    .hover_pos()
                    .is_some_and(|pos| self.hit_region.contains(pos));

            let mut target = EguiTarget::new(&painter);
            self.renderer
                .render_connection(&mut target, &self.connection, &self.style);
        });
    }
}

pub fn run(theme: Option<ThemeName>) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let style = match theme {
        Some(theme) => config.style_for(theme.as_str())?,
        None => config.resolved_style()?,
    };

    let title = "nodewire preview";
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 600.0])
        .with_title(title);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::debug!(style = %style.name, "opening preview window");
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(style, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
