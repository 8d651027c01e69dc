use crate::model::geometry::EPSILON;
use crate::model::mesh::VertexId;

/// gate for root-level pruning: successor generation asks before rooting a
/// node at a vertex, and the answer updates the table
pub trait RootFilter {
    /// true when a node rooted at `v` with cost `g` is worth keeping
    fn try_update(&mut self, v: VertexId, g: f64) -> bool;
}

/// per-vertex best-g table with epoch-lazy invalidation: entries from a
/// previous search are recognized by a stale epoch and treated as
/// uninitialized, so starting a new search is O(1).
#[derive(Debug)]
pub struct RootTable {
    best_g: Vec<f64>,
    epoch: Vec<u64>,
    current: u64,
}

impl RootTable {
    pub fn new(num_vertices: usize) -> RootTable {
        RootTable {
            best_g: vec![0.0; num_vertices],
            epoch: vec![0; num_vertices],
            current: 0,
        }
    }

    pub fn next_epoch(&mut self) {
        self.current += 1;
    }

    /// post-pop check: true when a strictly better path to this root has
    /// been recorded since the node was pushed
    pub fn dominated(&self, v: VertexId, g: f64) -> bool {
        self.epoch[v.0] == self.current && self.best_g[v.0] + EPSILON < g
    }
}

impl RootFilter for RootTable {
    fn try_update(&mut self, v: VertexId, g: f64) -> bool {
        if self.epoch[v.0] != self.current {
            // first time this search reaches the root
            self.epoch[v.0] = self.current;
            self.best_g[v.0] = g;
            true
        } else if self.best_g[v.0] + EPSILON < g {
            false
        } else {
            self.best_g[v.0] = g;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_always_passes() {
        let mut t = RootTable::new(4);
        t.next_epoch();
        assert!(t.try_update(VertexId(2), 5.0));
    }

    #[test]
    fn test_worse_g_is_pruned() {
        let mut t = RootTable::new(4);
        t.next_epoch();
        assert!(t.try_update(VertexId(2), 5.0));
        assert!(!t.try_update(VertexId(2), 5.1));
        assert!(t.try_update(VertexId(2), 4.9));
        assert!(t.dominated(VertexId(2), 5.0));
        assert!(!t.dominated(VertexId(2), 4.9));
    }

    #[test]
    fn test_epoch_invalidates_in_constant_time() {
        let mut t = RootTable::new(4);
        t.next_epoch();
        assert!(t.try_update(VertexId(1), 1.0));
        assert!(!t.try_update(VertexId(1), 2.0));
        t.next_epoch();
        // stale entry from the previous search no longer prunes
        assert!(t.try_update(VertexId(1), 2.0));
        assert!(!t.dominated(VertexId(2), 1.0));
    }
}
