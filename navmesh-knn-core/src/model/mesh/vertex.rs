use crate::model::geometry::Point;
use std::fmt::Display;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a mesh vertex together with the ordered fan of polygons around it.
/// obstacle wedges appear as `None` entries in the fan.
#[derive(Clone, Debug)]
pub struct MeshVertex {
    pub p: Point,
    /// incident polygons in circular order, `None` for obstacle sides
    pub polygons: Vec<Option<super::PolygonId>>,
    /// true when a shortest path may legally turn here: the vertex touches
    /// at least one obstacle wedge
    pub is_corner: bool,
    /// true when two or more obstacle wedges meet here, so a query point at
    /// this vertex does not identify a polygon without disambiguation
    pub is_ambiguous: bool,
}

impl MeshVertex {
    /// distinct traversable polygons around this vertex, in fan order
    pub fn traversable_polygons(&self) -> impl Iterator<Item = super::PolygonId> + '_ {
        self.polygons.iter().filter_map(|p| *p)
    }
}
