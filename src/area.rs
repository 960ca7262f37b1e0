use geo::GeodesicArea;
use geo_types::{Coord, LineString, Polygon};

use crate::dataset::{Dataset, PointId};
use crate::error::Result;

/// Area in square meters enclosed by a ring of lon/lat coordinates on the WGS-84 ellipsoid.
/// Winding order does not matter. Rings with fewer than 3 points have no area.
pub fn geodesic_area(coords: &[Coord<f64>]) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }
    let polygon = Polygon::new(LineString::from(coords.to_vec()), vec![]);
    // Signed area stays within half the earth for either orientation.
    polygon.geodesic_area_signed().abs()
}

pub fn ring_area(ring: &[PointId], dataset: &Dataset) -> Result<f64> {
    Ok(geodesic_area(&dataset.coords(ring)?))
}
