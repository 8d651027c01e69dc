use rstar::{RTreeObject, AABB};

use super::PolygonId;

/// bounding-box entry for one mesh polygon, used by point location to narrow
/// the candidate polygons before exact containment tests
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonRTreeObject {
    pub poly: PolygonId,
    pub envelope: AABB<[f64; 2]>,
}

impl PolygonRTreeObject {
    pub fn new(poly: PolygonId, min: [f64; 2], max: [f64; 2]) -> Self {
        PolygonRTreeObject {
            poly,
            envelope: AABB::from_corners(min, max),
        }
    }
}

impl RTreeObject for PolygonRTreeObject {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
