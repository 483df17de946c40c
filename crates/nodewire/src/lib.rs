//! Rendering of node-graph connections.
//!
//! A connection is a cubic Bézier between two ports. This crate turns its
//! geometry into a curve and a pointer hit region, derives a stable color from
//! the data type it carries, and paints it (halo, body, endpoint markers)
//! through a small [`paint::RenderTarget`] capability. An egui backend and a
//! recording backend are included.

pub mod color;
pub mod config;
pub mod geometry;
pub mod hit;
pub mod paint;
pub mod renderer;
pub mod style;

pub use color::derive_color;
pub use geometry::{ConnectionGeometry, ConnectionState, CubicCurve, build_curve};
pub use hit::{HitRegion, build_hit_region, hit_region_for};
pub use paint::{Brush, CommandRecorder, DrawCommand, EguiTarget, Pen, PenStyle, RenderTarget};
pub use renderer::{Connection, ConnectionRenderer};
pub use style::StyleConfig;
