use std::fmt::Display;

use super::VertexId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct PolygonId(pub usize);

impl Display for PolygonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a convex polygon of the mesh. `polygons[i]` is the neighbor across the
/// edge from `vertices[i-1]` to `vertices[i]` (indices taken cyclically),
/// `None` when that edge lies on an obstacle.
#[derive(Clone, Debug)]
pub struct MeshPolygon {
    /// counterclockwise
    pub vertices: Vec<VertexId>,
    pub polygons: Vec<Option<PolygonId>>,
    /// a dead-end polygon with at most one traversable neighbor. crossing
    /// into one can never shorten a path unless a goal lies inside it.
    pub is_one_way: bool,
}

impl MeshPolygon {
    pub fn sides(&self) -> usize {
        self.vertices.len()
    }

    /// endpoints of edge i as (earlier, later) in counterclockwise order,
    /// i.e. (vertices[i-1], vertices[i])
    pub fn edge(&self, i: usize) -> (VertexId, VertexId) {
        let n = self.vertices.len();
        (self.vertices[(i + n - 1) % n], self.vertices[i])
    }
}
