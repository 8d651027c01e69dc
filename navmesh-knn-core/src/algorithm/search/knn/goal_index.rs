use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::model::geometry::{in_sector, vector_angle, Point};

/// one goal in the spatial index
#[derive(Clone, Debug, PartialEq)]
pub struct GoalEntry {
    pub gid: usize,
    pub position: [f64; 2],
}

impl RTreeObject for GoalEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for GoalEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R*-tree over the goals not yet sealed, with incremental nearest-neighbor
/// traversal and the angular-sector variant the target heuristic needs.
/// sealed goals are removed, so every query sees exactly the remaining set.
pub struct GoalIndex {
    tree: RTree<GoalEntry>,
}

impl GoalIndex {
    pub fn build(goals: &[Point]) -> GoalIndex {
        let entries = goals
            .iter()
            .enumerate()
            .map(|(gid, p)| GoalEntry {
                gid,
                position: [p.x, p.y],
            })
            .collect();
        GoalIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn remove(&mut self, gid: usize, p: Point) -> bool {
        self.tree
            .remove(&GoalEntry {
                gid,
                position: [p.x, p.y],
            })
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// nearest remaining goal to `origin`
    pub fn nearest(&self, origin: Point) -> Option<(usize, f64)> {
        self.tree
            .nearest_neighbor_iter_with_distance_2(&[origin.x, origin.y])
            .next()
            .map(|(e, d2)| (e.gid, d2.sqrt()))
    }

    /// nearest remaining goal whose direction from `origin` lies in the
    /// counterclockwise sector [from, to]. entries pop in distance order,
    /// so the scan stops as soon as the frontier reaches `cur_min`: beyond
    /// that no sector member can improve the caller's bound.
    pub fn nearest_in_sector(
        &self,
        origin: Point,
        from: f64,
        to: f64,
        cur_min: f64,
    ) -> Option<(usize, f64)> {
        for (entry, d2) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[origin.x, origin.y])
        {
            let d = d2.sqrt();
            if d >= cur_min {
                return None;
            }
            let v = Point::new(entry.position[0] - origin.x, entry.position[1] - origin.y);
            if in_sector(vector_angle(&v), from, to) {
                return Some((entry.gid, d));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> GoalIndex {
        GoalIndex::build(&[
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-2.0, 0.0),
            Point::new(0.0, -3.0),
        ])
    }

    #[test]
    fn test_nearest() {
        let idx = index();
        let (gid, d) = idx.nearest(Point::new(0.1, 0.0)).unwrap();
        assert_eq!(gid, 0);
        assert!((d - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_in_sector_skips_closer_goals_outside() {
        let idx = index();
        // sector around the +y axis: goal 1 is the answer even though goal 0
        // is nearer to the origin
        let from = 45.0_f64.to_radians();
        let to = 135.0_f64.to_radians();
        let (gid, d) = idx
            .nearest_in_sector(Point::new(0.1, 0.0), from, to, f64::INFINITY)
            .unwrap();
        assert_eq!(gid, 1);
        assert!(d > 0.9);
    }

    #[test]
    fn test_nearest_in_sector_respects_cur_min() {
        let idx = index();
        let from = 45.0_f64.to_radians();
        let to = 135.0_f64.to_radians();
        // the only sector member sits ~1.005 away; a tighter bound ends the
        // scan empty-handed
        assert!(idx
            .nearest_in_sector(Point::new(0.1, 0.0), from, to, 0.5)
            .is_none());
    }

    #[test]
    fn test_remove_shrinks_the_set() {
        let mut idx = index();
        assert!(idx.remove(0, Point::new(1.0, 0.0)));
        assert!(!idx.remove(0, Point::new(1.0, 0.0)));
        assert_eq!(idx.len(), 3);
        let (gid, _) = idx.nearest(Point::new(0.1, 0.0)).unwrap();
        assert_ne!(gid, 0);
    }
}
