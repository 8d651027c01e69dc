use super::search_node::SearchNode;

/// index of a node in the pool, valid until the next [`NodePool::reclaim`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(pub u32);

/// bump arena for search nodes. nodes reference parents by index, parents
/// never reference children, and every node dies together at `reclaim`,
/// which runs in O(1) and keeps the allocation for the next search.
#[derive(Default, Debug)]
pub struct NodePool {
    nodes: Vec<SearchNode>,
}

impl NodePool {
    pub fn new() -> NodePool {
        NodePool::default()
    }

    pub fn allocate(&mut self, node: SearchNode) -> NodeRef {
        let index = self.nodes.len();
        self.nodes.push(node);
        NodeRef(index as u32)
    }

    pub fn get(&self, r: NodeRef) -> &SearchNode {
        &self.nodes[r.0 as usize]
    }

    pub fn reclaim(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::search_node::Collinear;
    use crate::model::geometry::Point;
    use crate::model::mesh::PolygonId;

    fn dummy(g: f64) -> SearchNode {
        SearchNode {
            parent: None,
            root: None,
            left: Point::new(0.0, 0.0),
            right: Point::new(1.0, 0.0),
            left_vertex: None,
            right_vertex: None,
            prev_polygon: None,
            entry_edge: None,
            next_polygon: PolygonId(0),
            g,
            f: g,
            col: Collinear::Lazy,
            goal_id: None,
        }
    }

    #[test]
    fn test_allocate_and_reclaim() {
        let mut pool = NodePool::new();
        let a = pool.allocate(dummy(1.0));
        let b = pool.allocate(dummy(2.0));
        assert_eq!(pool.get(a).g, 1.0);
        assert_eq!(pool.get(b).g, 2.0);
        assert_eq!(pool.len(), 2);
        pool.reclaim();
        assert!(pool.is_empty());
        let c = pool.allocate(dummy(3.0));
        assert_eq!(c, NodeRef(0));
        assert_eq!(pool.get(c).g, 3.0);
    }
}
