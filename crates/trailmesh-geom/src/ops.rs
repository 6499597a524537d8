use crate::point::{Line3, Point3};

/// Mean earth radius in meters (WGS84 authalic radius), used for all
/// geodesic distance calculations in this crate.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Micro-tolerance (degrees) used to buffer an "exact vertex" split point
/// and to discard zero-length split outputs. Matches spec.md §4.A.
pub const SPLIT_EPSILON_DEG: f64 = 1e-6;

fn haversine_m(a: Point3, b: Point3) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Straight-line geodesic distance between two points, in meters. Ignores
/// elevation (matches spec.md's planar-distance treatment; elevation gain
/// and loss are tracked separately, never folded into `length_km`).
pub fn geodesic_distance_m(a: Point3, b: Point3) -> f64 {
    haversine_m(a, b)
}

/// Total geodesic length of a polyline, in meters. Always positive for a
/// valid (≥2 point, non-degenerate) `Line3`.
pub fn length_geodesic(line: &Line3) -> f64 {
    line.points().windows(2).map(|w| haversine_m(w[0], w[1])).sum()
}

/// Cumulative station (meters from the line's start) at each vertex.
fn stations_m(line: &Line3) -> Vec<f64> {
    let mut acc = 0.0;
    let mut out = Vec::with_capacity(line.len());
    out.push(0.0);
    for w in line.points().windows(2) {
        acc += haversine_m(w[0], w[1]);
        out.push(acc);
    }
    out
}

/// Result of projecting a point onto a line: the fractional position
/// `t ∈ [0, 1]`, the index of the segment containing the projection, and
/// the projected point itself (with interpolated elevation).
#[derive(Clone, Copy, Debug)]
struct Projection {
    t: f64,
    segment: usize,
    point: Point3,
    distance_along_m: f64,
}

fn project(line: &Line3, target: Point3) -> Projection {
    let pts = line.points();
    let total = length_geodesic(line);
    let mut best: Option<Projection> = None;
    let mut acc = 0.0;
    for (i, w) in pts.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let seg_len = haversine_m(a, b);
        let (proj, frac) = closest_on_segment(a, b, target);
        let distance_along_m = acc + frac * seg_len;
        let d = haversine_m(proj, target);
        let candidate = Projection {
            t: if total > 0.0 { distance_along_m / total } else { 0.0 },
            segment: i,
            point: proj,
            distance_along_m,
        };
        if best.map(|b| d < haversine_m(b.point, target)).unwrap_or(true) {
            best = Some(candidate);
        }
        acc += seg_len;
    }
    best.unwrap_or(Projection { t: 0.0, segment: 0, point: pts[0], distance_along_m: 0.0 })
}

/// Closest point on segment `a..b` (planar lng/lat approximation, valid at
/// trail scale) to `target`, plus the fraction along the segment in
/// `[0, 1]`. Elevation is linearly interpolated along the fraction.
fn closest_on_segment(a: Point3, b: Point3, target: Point3) -> (Point3, f64) {
    let (ax, ay) = (a.lng, a.lat);
    let (bx, by) = (b.lng, b.lat);
    let (tx, ty) = (target.lng, target.lat);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let frac = if len_sq <= f64::EPSILON {
        0.0
    } else {
        (((tx - ax) * dx + (ty - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let elevation = match (a.elevation, b.elevation) {
        (Some(ea), Some(eb)) => Some(ea + (eb - ea) * frac),
        _ => None,
    };
    (Point3::new(ax + dx * frac, ay + dy * frac, elevation), frac)
}

/// Fractional position `t ∈ [0, 1]` of the closest-point projection of
/// `point` onto `line`.
pub fn line_locate(line: &Line3, point: Point3) -> f64 {
    project(line, point).t
}

/// The closest point on `line` to `point`, with interpolated elevation.
pub fn closest_point(line: &Line3, point: Point3) -> Point3 {
    project(line, point).point
}

/// The point at fractional position `t ∈ [0, 1]` along `line`.
pub fn line_interpolate(line: &Line3, t: f64) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    let total = length_geodesic(line);
    let target_m = total * t;
    let stations = stations_m(line);
    let pts = line.points();
    for w in 0..pts.len() - 1 {
        if target_m <= stations[w + 1] || w == pts.len() - 2 {
            let seg_len = stations[w + 1] - stations[w];
            let frac = if seg_len > 0.0 { (target_m - stations[w]) / seg_len } else { 0.0 };
            return closest_on_segment(pts[w], pts[w + 1], {
                // Interpolate directly instead of projecting: build the
                // point at `frac` along the segment.
                let (dx, dy) = (pts[w + 1].lng - pts[w].lng, pts[w + 1].lat - pts[w].lat);
                Point3::new(pts[w].lng + dx * frac, pts[w].lat + dy * frac, None)
            })
            .0;
        }
    }
    pts[pts.len() - 1]
}

/// Splits `line` at `point`, returning an ordered sequence of ≥1 sub-lines.
///
/// If the projection of `point` is interior, returns two linestrings
/// (left, right). If it lands within [`SPLIT_EPSILON_DEG`] of an endpoint,
/// returns the original line unchanged (one output) — the split is a
/// no-op at the boundary, matching spec.md §4.A's endpoint case.
pub fn split_by_point(line: &Line3, point: Point3) -> Vec<Line3> {
    let proj = project(line, point);
    let pts = line.points();

    let near_start = proj.segment == 0
        && haversine_m(pts[0], proj.point) < SPLIT_EPSILON_DEG * 111_000.0;
    let near_end = proj.segment == pts.len() - 2
        && haversine_m(pts[pts.len() - 1], proj.point) < SPLIT_EPSILON_DEG * 111_000.0;
    if near_start || near_end {
        return vec![line.clone()];
    }

    let mut left: Vec<Point3> = pts[..=proj.segment].to_vec();
    left.push(proj.point);
    let mut right: Vec<Point3> = vec![proj.point];
    right.extend_from_slice(&pts[proj.segment + 1..]);

    let mut out = Vec::with_capacity(2);
    if let Some(l) = Line3::new(dedup_consecutive(left)) {
        if length_geodesic(&l) > 0.0 {
            out.push(l);
        }
    }
    if let Some(r) = Line3::new(dedup_consecutive(right)) {
        if length_geodesic(&r) > 0.0 {
            out.push(r);
        }
    }
    if out.is_empty() {
        out.push(line.clone());
    }
    out
}

fn dedup_consecutive(points: Vec<Point3>) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map(|last| haversine_m(*last, p) < 1e-9).unwrap_or(false) {
            continue;
        }
        out.push(p);
    }
    out
}

/// Moves the vertices of `a` onto `b` wherever within `tol` meters of the
/// closest point on `b`. Used to normalize near-coincident intersection
/// candidates before detection, per spec.md §4.A.
pub fn snap(a: &Line3, b: &Line3, tol_m: f64) -> Line3 {
    let snapped: Vec<Point3> = a
        .points()
        .iter()
        .map(|&p| {
            let cp = closest_point(b, p);
            if haversine_m(p, cp) <= tol_m {
                cp
            } else {
                p
            }
        })
        .collect();
    Line3::new(dedup_consecutive(snapped)).unwrap_or_else(|| a.clone())
}

/// Rounds every coordinate of `line` to `decimals` places, used to
/// normalize near-equal coordinates prior to [`snap`]. Six decimals is
/// approximately 11 cm at the equator.
pub fn coordinate_round(line: &Line3, decimals: u32) -> Line3 {
    let scale = 10f64.powi(decimals as i32);
    let rounded: Vec<Point3> = line
        .points()
        .iter()
        .map(|p| {
            Point3::new(
                (p.lng * scale).round() / scale,
                (p.lat * scale).round() / scale,
                p.elevation.map(|e| (e * scale).round() / scale),
            )
        })
        .collect();
    Line3::new(rounded).unwrap_or_else(|| line.clone())
}

/// Point-like intersections between two polylines (a crossing, not a
/// shared-segment overlap). `kind` downstream distinguishes a proper
/// crossing from an endpoint touch; this primitive only reports geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub point: Point3,
    /// `true` when the intersection lands at an endpoint of either input.
    pub at_endpoint: bool,
}

/// Computes every point-like intersection between `a` and `b` via
/// pairwise segment intersection (the planar-scale equivalent of
/// `ST_Intersects` + `ST_Dump` for point geometries). Collinear/overlapping
/// segments are not reported as point intersections — the deduplicator
/// (`trailmesh-dedup`) is responsible for that case.
pub fn intersection(a: &Line3, b: &Line3) -> Vec<Intersection> {
    let mut out = Vec::new();
    let (pa, pb) = (a.points(), b.points());
    for wa in pa.windows(2) {
        for wb in pb.windows(2) {
            if let Some(p) = segment_intersection(wa[0], wa[1], wb[0], wb[1]) {
                let at_endpoint = is_endpoint(wa[0], wa[1], p) || is_endpoint(wb[0], wb[1], p);
                out.push(Intersection { point: p, at_endpoint });
            }
        }
    }
    out
}

fn is_endpoint(a: Point3, b: Point3, p: Point3) -> bool {
    haversine_m(a, p) < 1e-3 || haversine_m(b, p) < 1e-3
}

/// Standard 2D segment-segment intersection (parametric form). Returns
/// `None` for parallel/collinear segments — those are overlaps, not
/// crossings.
fn segment_intersection(p1: Point3, p2: Point3, p3: Point3, p4: Point3) -> Option<Point3> {
    let (x1, y1, x2, y2) = (p1.lng, p1.lat, p2.lng, p2.lat);
    let (x3, y3, x4, y4) = (p3.lng, p3.lat, p4.lng, p4.lat);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < 1e-15 {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = ((x1 - x3) * (y1 - y2) - (y1 - y3) * (x1 - x2)) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    let elevation = match (p1.elevation, p2.elevation) {
        (Some(e1), Some(e2)) => Some(e1 + (e2 - e1) * t),
        _ => None,
    };
    Some(Point3::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1), elevation))
}

/// Result of a coverage check between a whole trail and the union of its
/// candidate replacement segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageDifference {
    pub uncovered_length_m: f64,
    /// Proxy area measure: `uncovered_length_m` times a nominal corridor
    /// width (`SPLIT_EPSILON_DEG` in meters), since these are linestrings
    /// rather than polygons. Only used as a near-zero sanity check —
    /// `coverage_difference` is not meant to detect sliver polygons here,
    /// only that every meter of the original is accounted for.
    pub uncovered_area: f64,
}

/// Compares `whole`'s length against the sum of `parts`' lengths, treating
/// any shortfall as uncovered length. This approximates PostGIS's
/// `ST_Difference`-based coverage check without requiring a polygon
/// buffering step: for a correct split, `parts` exactly partitions
/// `whole`'s arc length, so any shortfall indicates a gap.
pub fn coverage_difference(whole: &Line3, parts: &[Line3]) -> CoverageDifference {
    let whole_len = length_geodesic(whole);
    let parts_len: f64 = parts.iter().map(length_geodesic).sum();
    let uncovered_length_m = (whole_len - parts_len).max(0.0);
    CoverageDifference {
        uncovered_length_m,
        uncovered_area: uncovered_length_m * (SPLIT_EPSILON_DEG * 111_000.0),
    }
}

/// Arc length of `a` that lies within `tol_m` of `b` (meters), sampled at
/// `SHARED_LENGTH_SAMPLES` points along `a`. Used by the deduplicator as
/// the linestring proxy for `area(intersection)` in `overlap_ratio =
/// area(intersection) / min(area(a), area(b))` — since both trails are
/// corridors of the same nominal width rather than polygons, the width
/// cancels out of the ratio and shared arc length stands in for shared
/// area directly.
pub fn shared_length_m(a: &Line3, b: &Line3, tol_m: f64) -> f64 {
    const SHARED_LENGTH_SAMPLES: usize = 32;
    let a_len = length_geodesic(a);
    let mut shared = 0.0;
    for k in 0..=SHARED_LENGTH_SAMPLES {
        let t = k as f64 / SHARED_LENGTH_SAMPLES as f64;
        let p = line_interpolate(a, t);
        let cp = closest_point(b, p);
        if haversine_m(p, cp) <= tol_m {
            shared += a_len / SHARED_LENGTH_SAMPLES as f64;
        }
    }
    shared.min(a_len)
}
