use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use trailmesh_geom::{Line3, Point3};

/// Rounds to 6 decimal places, the round-trip precision spec.md §4.H/§8-6
/// requires of exported geometry (roughly 11 cm at the equator).
fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

/// Serializes `line` as GeoJSON `LineString` text, preserving Z wherever
/// the source point has an elevation.
pub fn to_geojson(line: &Line3) -> String {
    let coordinates: Vec<Value> = line
        .points()
        .iter()
        .map(|p| match p.elevation {
            Some(z) => json!([round6(p.lng), round6(p.lat), round6(z)]),
            None => json!([round6(p.lng), round6(p.lat)]),
        })
        .collect();
    json!({ "type": "LineString", "coordinates": coordinates }).to_string()
}

/// Parses GeoJSON `LineString` text back into a [`Line3`], the inverse of
/// [`to_geojson`].
pub fn from_geojson(text: &str) -> Result<Line3> {
    let value: Value = serde_json::from_str(text)?;
    let coordinates = value
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("geojson value has no coordinates array"))?;

    let mut points = Vec::with_capacity(coordinates.len());
    for coord in coordinates {
        let arr = coord.as_array().ok_or_else(|| anyhow!("geojson coordinate is not an array"))?;
        let lng = arr.first().and_then(Value::as_f64).ok_or_else(|| anyhow!("coordinate missing lng"))?;
        let lat = arr.get(1).and_then(Value::as_f64).ok_or_else(|| anyhow!("coordinate missing lat"))?;
        let elevation = arr.get(2).and_then(Value::as_f64);
        points.push(Point3::new(lng, lat, elevation));
    }
    Line3::new(points).ok_or_else(|| anyhow!("geojson linestring must have at least two points"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_2d_line_to_six_decimals() {
        let line = Line3::new(vec![Point3::new_2d(-105.123_456_7, 40.000_000_1), Point3::new_2d(-105.2, 40.1)]).unwrap();
        let parsed = from_geojson(&to_geojson(&line)).unwrap();
        assert!((parsed.first().lng - -105.123_457).abs() < 1e-6);
        assert!(parsed.first().elevation.is_none());
    }

    #[test]
    fn round_trips_3d_line_preserving_elevation() {
        let line = Line3::new(vec![
            Point3::new(-105.3, 40.0, Some(1800.0)),
            Point3::new(-105.2, 40.0, Some(1820.0)),
        ])
        .unwrap();
        let parsed = from_geojson(&to_geojson(&line)).unwrap();
        assert_eq!(parsed.first().elevation, Some(1800.0));
        assert_eq!(parsed.last().elevation, Some(1820.0));
    }
}
