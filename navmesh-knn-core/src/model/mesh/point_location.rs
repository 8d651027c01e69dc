use super::{PolygonId, VertexId};

/// classification of a query point against the mesh. edge and border cases
/// carry the edge endpoints so that search seeding can skip the shared side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointLocation {
    NotOnMesh,
    InPolygon(PolygonId),
    /// on an edge whose far side is an obstacle
    OnMeshBorder {
        poly: PolygonId,
        v1: VertexId,
        v2: VertexId,
    },
    /// on an edge shared by two polygons
    OnEdge {
        poly1: PolygonId,
        poly2: PolygonId,
        v1: VertexId,
        v2: VertexId,
    },
    /// exactly on an interior vertex where turning is illegal
    OnNonCornerVertex { vertex: VertexId, poly: PolygonId },
    /// on a corner vertex with a single obstacle wedge: any incident polygon
    /// identifies the point
    OnCornerVertexUnambig { vertex: VertexId, poly: PolygonId },
    /// on a corner vertex with several obstacle wedges. `resolved` is the
    /// polygon found by nudging the point by (10 epsilon, 10 epsilon) and
    /// relocating, `None` when even the nudged point stays ambiguous or
    /// leaves the mesh.
    OnCornerVertexAmbig {
        vertex: VertexId,
        resolved: Option<PolygonId>,
    },
}

impl PointLocation {
    /// the polygon a single-polygon consumer should use, if any
    pub fn primary_polygon(&self) -> Option<PolygonId> {
        match self {
            PointLocation::NotOnMesh => None,
            PointLocation::InPolygon(p) => Some(*p),
            PointLocation::OnMeshBorder { poly, .. } => Some(*poly),
            PointLocation::OnEdge { poly1, .. } => Some(*poly1),
            PointLocation::OnNonCornerVertex { poly, .. } => Some(*poly),
            PointLocation::OnCornerVertexUnambig { poly, .. } => Some(*poly),
            PointLocation::OnCornerVertexAmbig { resolved, .. } => *resolved,
        }
    }
}
