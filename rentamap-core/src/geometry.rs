use serde::{Deserialize, Serialize};
use tracing::trace;

/// A longitude/latitude pair, serialised GeoJSON-style as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const ZERO: LngLat = LngLat { lng: 0.0, lat: 0.0 };

    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(c: [f64; 2]) -> Self {
        Self { lng: c[0], lat: c[1] }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

/// Feature geometry as delivered by the tile source.
///
/// Municipality features are polygons or multipolygons; points show up for
/// geocoder results. Rings follow the GeoJSON convention: the first ring of
/// a polygon is the outer boundary, later rings are holes (ignored for
/// centroid purposes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(LngLat),
    Polygon(Vec<Vec<LngLat>>),
    MultiPolygon(Vec<Vec<Vec<LngLat>>>),
}

impl Geometry {
    /// Geometric center of the shape, used as the focus target for fly-to.
    ///
    /// Total: degenerate rings fall back to the vertex mean, and an empty
    /// geometry yields the origin rather than an error.
    pub fn centroid(&self) -> LngLat {
        match self {
            Geometry::Point(p) => *p,
            Geometry::Polygon(rings) => {
                centroid_of_rings(std::slice::from_ref(rings))
            }
            Geometry::MultiPolygon(polys) => centroid_of_rings(polys),
        }
    }
}

/// Area-weighted centroid over the outer ring of each polygon.
fn centroid_of_rings(polys: &[Vec<Vec<LngLat>>]) -> LngLat {
    let mut weighted = (0.0, 0.0);
    let mut total_area = 0.0;
    for rings in polys {
        if let Some(outer) = rings.first() {
            if let Some((c, area)) = ring_centroid(outer) {
                weighted.0 += c.lng * area;
                weighted.1 += c.lat * area;
                total_area += area;
            }
        }
    }
    if total_area > 0.0 {
        return LngLat::new(weighted.0 / total_area, weighted.1 / total_area);
    }
    // All rings degenerate: average every vertex we have.
    trace!("degenerate geometry, centroid falls back to vertex mean");
    vertex_mean(polys.iter().flatten().flatten()).unwrap_or(LngLat::ZERO)
}

/// Signed-area (shoelace) centroid of a single ring.
///
/// Returns `None` for rings with fewer than three vertices or near-zero
/// area, where the formula divides by ~0.
fn ring_centroid(ring: &[LngLat]) -> Option<(LngLat, f64)> {
    if ring.len() < 3 {
        return None;
    }
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let cross = a.lng * b.lat - b.lng * a.lat;
        area2 += cross;
        cx += (a.lng + b.lng) * cross;
        cy += (a.lat + b.lat) * cross;
    }
    if area2.abs() < 1e-12 {
        return None;
    }
    let c = LngLat::new(cx / (3.0 * area2), cy / (3.0 * area2));
    Some((c, area2.abs() / 2.0))
}

fn vertex_mean<'a>(points: impl Iterator<Item = &'a LngLat>) -> Option<LngLat> {
    let mut sum = (0.0, 0.0);
    let mut n = 0usize;
    for p in points {
        sum.0 += p.lng;
        sum.1 += p.lat;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(LngLat::new(sum.0 / n as f64, sum.1 / n as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<LngLat> {
        vec![
            LngLat::new(x0, y0),
            LngLat::new(x0 + side, y0),
            LngLat::new(x0 + side, y0 + side),
            LngLat::new(x0, y0 + side),
        ]
    }

    #[test]
    fn point_centroid_is_itself() {
        let p = LngLat::new(-3.7038, 40.4168);
        assert_eq!(Geometry::Point(p).centroid(), p);
    }

    #[test]
    fn square_centroid() {
        let g = Geometry::Polygon(vec![square(0.0, 0.0, 2.0)]);
        let c = g.centroid();
        assert!((c.lng - 1.0).abs() < EPSILON);
        assert!((c.lat - 1.0).abs() < EPSILON);
    }

    #[test]
    fn winding_direction_does_not_matter() {
        let mut reversed = square(0.0, 0.0, 2.0);
        reversed.reverse();
        let c = Geometry::Polygon(vec![reversed]).centroid();
        assert!((c.lng - 1.0).abs() < EPSILON);
        assert!((c.lat - 1.0).abs() < EPSILON);
    }

    #[test]
    fn multipolygon_weights_by_area() {
        // A 2×2 square at the origin and a 1×1 square far east: the big
        // square pulls the centroid 4:1.
        let g = Geometry::MultiPolygon(vec![
            vec![square(0.0, 0.0, 2.0)],
            vec![square(10.0, 0.0, 1.0)],
        ]);
        let c = g.centroid();
        let expected_lng = (1.0 * 4.0 + 10.5 * 1.0) / 5.0;
        assert!((c.lng - expected_lng).abs() < EPSILON);
    }

    #[test]
    fn degenerate_ring_falls_back_to_vertex_mean() {
        let g = Geometry::Polygon(vec![vec![LngLat::new(1.0, 2.0), LngLat::new(3.0, 4.0)]]);
        let c = g.centroid();
        assert!((c.lng - 2.0).abs() < EPSILON);
        assert!((c.lat - 3.0).abs() < EPSILON);
    }

    #[test]
    fn empty_geometry_is_total() {
        assert_eq!(Geometry::Polygon(vec![]).centroid(), LngLat::ZERO);
        assert_eq!(Geometry::MultiPolygon(vec![]).centroid(), LngLat::ZERO);
    }

    #[test]
    fn lnglat_serialises_as_pair() {
        let json = serde_json::to_string(&LngLat::new(-3.5, 40.0)).unwrap();
        assert_eq!(json, "[-3.5,40.0]");
        let back: LngLat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LngLat::new(-3.5, 40.0));
    }
}
