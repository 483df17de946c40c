use std::f32::consts::PI;

use eframe::egui::{Pos2, Rect, Vec2};

use crate::geometry::{ConnectionGeometry, DEFAULT_SEGMENTS, build_curve};

/// Width of the band around a connection that counts as a pointer hit.
pub const DEFAULT_HIT_WIDTH: f32 = 10.0;

/// Sides of the polygon standing in for a round join or cap.
const JOIN_SIDES: usize = 12;

/// Filled area around a polyline, used for pointer picking.
///
/// Stored as a union of convex polygons: one quad per segment and one
/// circumscribed polygon per vertex, which covers the joins and both caps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRegion {
    polygons: Vec<Vec<Pos2>>,
}

impl HitRegion {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn polygons(&self) -> &[Vec<Pos2>] {
        &self.polygons
    }

    /// Whether `point` lies inside the region (boundary included).
    pub fn contains(&self, point: Pos2) -> bool {
        point.is_finite() && self.polygons.iter().any(|poly| convex_contains(poly, point))
    }

    /// Smallest rectangle enclosing the region, `Rect::NOTHING` when empty.
    pub fn bounding_rect(&self) -> Rect {
        self.polygons
            .iter()
            .flatten()
            .fold(Rect::NOTHING, |rect, p| rect.union(Rect::from_min_max(*p, *p)))
    }
}

/// Expand a polyline into a band `width` wide, with round joins and caps.
///
/// Fewer than two points, any non-finite point, or a width that is not a
/// positive finite number all yield an empty region.
pub fn build_hit_region(polyline: &[Pos2], width: f32) -> HitRegion {
    if polyline.len() < 2 || !width.is_finite() || width <= 0.0 {
        return HitRegion::empty();
    }
    if !polyline.iter().all(|p| p.is_finite()) {
        return HitRegion::empty();
    }

    let half = width / 2.0;
    let extent = polyline
        .iter()
        .fold(0.0_f32, |m, p| m.max(p.x.abs()).max(p.y.abs()));
    if extent + half == extent {
        // The band is thinner than one f32 step at these coordinates.
        return HitRegion::empty();
    }

    let mut polygons = Vec::with_capacity(polyline.len() * 2 - 1);

    for pair in polyline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dir = b - a;
        if dir.length() < f32::EPSILON {
            continue;
        }
        let normal = dir.normalized().rot90() * half;
        push_if_solid(&mut polygons, vec![a + normal, b + normal, b - normal, a - normal]);
    }

    let mut previous: Option<Pos2> = None;
    for &vertex in polyline {
        if previous == Some(vertex) {
            continue;
        }
        push_if_solid(&mut polygons, round_join(vertex, half));
        previous = Some(vertex);
    }

    HitRegion { polygons }
}

/// Keep only polygons that still enclose some area after rounding.
fn push_if_solid(polygons: &mut Vec<Vec<Pos2>>, polygon: Vec<Pos2>) {
    if doubled_area(&polygon) != 0.0 {
        polygons.push(polygon);
    }
}

/// Twice the signed area, measured from the first vertex so that large
/// offsets cancel before multiplying.
fn doubled_area(poly: &[Pos2]) -> f32 {
    let Some(&origin) = poly.first() else {
        return 0.0;
    };
    poly.windows(2)
        .map(|pair| {
            let (u, v) = (pair[0] - origin, pair[1] - origin);
            u.x * v.y - u.y * v.x
        })
        .sum()
}

/// Hit region for a connection at the default resolution and width.
pub fn hit_region_for(geom: &ConnectionGeometry) -> HitRegion {
    let polyline = build_curve(geom).approximate_polyline(DEFAULT_SEGMENTS);
    build_hit_region(&polyline, DEFAULT_HIT_WIDTH)
}

/// Regular polygon whose inscribed circle has the given radius.
fn round_join(center: Pos2, radius: f32) -> Vec<Pos2> {
    let outer = radius / (PI / JOIN_SIDES as f32).cos();
    (0..JOIN_SIDES)
        .map(|i| {
            let angle = 2.0 * PI * i as f32 / JOIN_SIDES as f32;
            center + Vec2::angled(angle) * outer
        })
        .collect()
}

/// Point-in-convex-polygon test for either winding order.
///
/// A polygon with no area contains nothing.
fn convex_contains(poly: &[Pos2], point: Pos2) -> bool {
    let mut sign = 0.0_f32;
    for (i, &a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        let cross = (b - a).x * (point - a).y - (b - a).y * (point - a).x;
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}
