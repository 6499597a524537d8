use geo::{Coord, LineString};

/// A single WGS84 vertex with an optional elevation in meters.
///
/// `elevation` is `None` for 2D trails and `Some(_)` for 3D trails; callers
/// must not silently coerce a missing elevation to `0.0` (see
/// `trailmesh-model`'s elevation-stat invariants).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3 {
    pub lng: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
}

impl Point3 {
    pub const fn new(lng: f64, lat: f64, elevation: Option<f64>) -> Self {
        Self { lng, lat, elevation }
    }

    pub const fn new_2d(lng: f64, lat: f64) -> Self {
        Self { lng, lat, elevation: None }
    }

    pub(crate) fn to_coord(self) -> Coord<f64> {
        Coord { x: self.lng, y: self.lat }
    }

    pub(crate) fn from_coord(c: Coord<f64>, elevation: Option<f64>) -> Self {
        Self { lng: c.x, lat: c.y, elevation }
    }
}

/// An ordered, ≥2-point 3D polyline.
///
/// Mirrors `geo::LineString` but keeps the Z channel as a parallel `Vec`
/// instead of folding it into the coordinate type, so planar `geo`
/// algorithms can operate directly on [`Line3::planar`] without a
/// round-trip conversion per call.
#[derive(Clone, Debug, PartialEq)]
pub struct Line3 {
    points: Vec<Point3>,
}

impl Line3 {
    /// Builds a line from at least two points.
    ///
    /// Returns `None` for fewer than two points, matching the Trail
    /// geometry-validity invariant (`geometry`, ≥2 points).
    pub fn new(points: Vec<Point3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    pub fn first(&self) -> Point3 {
        self.points[0]
    }

    pub fn last(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false // guaranteed non-empty by `new`
    }

    /// Returns `true` when any elevation channel is populated. A 3D trail
    /// has every vertex populated; this is a cheap first-vertex probe used
    /// by callers deciding whether to enforce elevation-stat invariants.
    pub fn has_elevation(&self) -> bool {
        self.points.iter().any(|p| p.elevation.is_some())
    }

    /// Projects to a planar `geo::LineString<f64>` (lng, lat only).
    pub fn planar(&self) -> LineString<f64> {
        LineString::new(self.points.iter().map(|p| p.to_coord()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_point() {
        assert!(Line3::new(vec![Point3::new_2d(0.0, 0.0)]).is_none());
    }

    #[test]
    fn accepts_two_points() {
        let line = Line3::new(vec![Point3::new_2d(0.0, 0.0), Point3::new_2d(1.0, 1.0)]).unwrap();
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn has_elevation_detects_any_z() {
        let line = Line3::new(vec![
            Point3::new(0.0, 0.0, None),
            Point3::new(1.0, 1.0, Some(100.0)),
        ])
        .unwrap();
        assert!(line.has_elevation());
    }
}
