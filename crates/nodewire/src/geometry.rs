use eframe::egui::Pos2;

/// Number of line segments used when flattening a connection curve.
pub const DEFAULT_SEGMENTS: usize = 20;

/// Upper bound on the horizontal reach of the default control points.
const DEFAULT_CONTROL_OFFSET: f32 = 200.0;

/// Endpoints and control points of a single connection, in scene space.
///
/// Owned by the connection it describes. The renderer only reads it; whoever
/// moves `source` or `sink` is responsible for recomputing the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionGeometry {
    pub source: Pos2,
    pub sink: Pos2,
    pub controls: (Pos2, Pos2),
    pub hovered: bool,
}

impl ConnectionGeometry {
    /// Geometry with control points derived from the endpoints.
    ///
    /// Connections running left to right get horizontal tangents. When the sink
    /// sits left of the source the controls swing upwards so the curve loops
    /// back instead of collapsing onto itself.
    pub fn new(source: Pos2, sink: Pos2) -> Self {
        Self {
            source,
            sink,
            controls: default_controls(source, sink),
            hovered: false,
        }
    }

    /// Geometry with explicit control points.
    pub fn with_controls(source: Pos2, sink: Pos2, control1: Pos2, control2: Pos2) -> Self {
        Self {
            source,
            sink,
            controls: (control1, control2),
            hovered: false,
        }
    }

    /// Move both endpoints and recompute the default control points.
    pub fn set_endpoints(&mut self, source: Pos2, sink: Pos2) {
        self.source = source;
        self.sink = sink;
        self.controls = default_controls(source, sink);
    }

    pub fn is_finite(&self) -> bool {
        [self.source, self.sink, self.controls.0, self.controls.1]
            .iter()
            .all(|p| p.is_finite())
    }
}

fn default_controls(source: Pos2, sink: Pos2) -> (Pos2, Pos2) {
    let x_distance = sink.x - source.x;
    let offset = DEFAULT_CONTROL_OFFSET.min(x_distance.abs());

    let (ratio, vertical) = if x_distance <= 0.0 {
        (1.0, -offset)
    } else {
        (0.5, 0.0)
    };

    (
        Pos2::new(source.x + offset * ratio, source.y + vertical),
        Pos2::new(sink.x - offset * ratio, sink.y + vertical),
    )
}

/// Interactive state of a connection that is owned outside the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// True while the connection is being dragged out and one end is still
    /// floating, not yet attached to a port.
    pub requires_port: bool,
}

/// Cubic Bézier segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    pub start: Pos2,
    pub control1: Pos2,
    pub control2: Pos2,
    pub end: Pos2,
}

/// Build the cubic curve for a connection: source, both controls, sink.
pub fn build_curve(geom: &ConnectionGeometry) -> CubicCurve {
    CubicCurve {
        start: geom.source,
        control1: geom.controls.0,
        control2: geom.controls.1,
        end: geom.sink,
    }
}

impl CubicCurve {
    pub fn points(&self) -> [Pos2; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    ///
    /// `evaluate(0.0)` is exactly `start` and `evaluate(1.0)` exactly `end`.
    pub fn evaluate(&self, t: f32) -> Pos2 {
        let it = 1.0 - t;
        let w0 = it * it * it;
        let w1 = 3.0 * it * it * t;
        let w2 = 3.0 * it * t * t;
        let w3 = t * t * t;
        Pos2::new(
            w0 * self.start.x + w1 * self.control1.x + w2 * self.control2.x + w3 * self.end.x,
            w0 * self.start.y + w1 * self.control1.y + w2 * self.control2.y + w3 * self.end.y,
        )
    }

    /// Flatten the curve into `segments + 1` points.
    ///
    /// The first point is `start`; the rest are samples at `i / segments` for
    /// `i = 1..=segments`, so the last one lands on `end`. A request for zero
    /// segments is treated as one.
    pub fn approximate_polyline(&self, segments: usize) -> Vec<Pos2> {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments + 1);
        points.push(self.start);
        for i in 1..=segments {
            let ratio = i as f32 / segments as f32;
            points.push(self.evaluate(ratio));
        }
        points
    }
}

/// Compute the total length of a polyline.
pub fn polyline_length(points: &[Pos2]) -> f32 {
    points.windows(2).map(|pair| (pair[1] - pair[0]).length()).sum()
}

/// Find the point at a given distance along a polyline.
///
/// Distances past the end clamp to the last point; an empty polyline yields
/// the origin.
pub fn polyline_point_at_distance(points: &[Pos2], distance: f32) -> Pos2 {
    let mut remaining = distance.max(0.0);
    for pair in points.windows(2) {
        let seg_len = (pair[1] - pair[0]).length();
        if remaining <= seg_len {
            let t = remaining / seg_len.max(0.001);
            return pair[0] + (pair[1] - pair[0]) * t;
        }
        remaining -= seg_len;
    }
    points.last().copied().unwrap_or(Pos2::ZERO)
}
