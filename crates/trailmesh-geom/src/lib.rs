//! Geodesic and planar geometry primitives over 3D trail polylines.
//!
//! All public operations take/return [`Point3`] / [`Line3`] so elevation
//! travels alongside every transform. Internally a handful of operations
//! drop to a planar `geo::LineString<f64>` (lng/lat only) to reuse `geo`'s
//! closest-point and locate-point algorithms; the Z channel never leaks out
//! of this module (it is carried on the side and reattached by
//! interpolation before the result is returned).

mod index;
mod ops;
mod point;

pub use index::{BoundingBox, SpatialIndex};
pub use ops::{
    closest_point, coordinate_round, coverage_difference, geodesic_distance_m, intersection,
    length_geodesic, line_interpolate, line_locate, shared_length_m, snap, split_by_point,
    CoverageDifference, Intersection,
};
pub use point::{Line3, Point3};
