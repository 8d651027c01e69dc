//! small meshes shared by unit and end-to-end tests, written in the text
//! format so the parser is exercised on every load.

use crate::model::mesh::Mesh;

/// the unit square as a 2x2 grid of quarter squares. no obstacles, so every
/// geodesic is a straight line even though paths cross interior edges.
///
/// ```text
/// 6 -- 7 -- 8
/// | P2 | P3 |
/// 3 -- 4 -- 5
/// | P0 | P1 |
/// 0 -- 1 -- 2
/// ```
pub const GRID_MESH: &str = "\
mesh
2
9 4
0 0 2 0 -1
0.5 0 3 1 0 -1
1 0 2 1 -1
0 0.5 3 2 0 -1
0.5 0.5 4 0 1 3 2
1 0.5 3 1 3 -1
0 1 2 2 -1
0.5 1 3 3 2 -1
1 1 2 3 -1
4 0 1 4 3 4 -1 -1 1 2
4 1 2 5 4 4 0 -1 -1 3
4 3 4 7 6 4 -1 0 3 -1
4 4 5 8 7 4 2 1 -1 -1
";

/// an L-shaped room: the unit square with the block (0.4..1, 0..0.6)
/// removed. the reflex corner at (0.4, 0.6) (vertex 2) is the only interior
/// turning point. both arm-end polygons are dead ends and exercise the
/// one-way rule.
///
/// ```text
/// 6 ---- 7 ------ 5
/// |  P1  |   P2   |
/// 3 ---- 2 ------ 4
/// |  P0  |xxxxxxxx
/// 0 ---- 1xxxxxxxx
/// ```
pub const L_ROOM_MESH: &str = "\
mesh
2
8 3
0 0 2 0 -1
0.4 0 2 0 -1
0.4 0.6 4 0 1 2 -1
0 0.6 3 1 0 -1
1 0.6 2 2 -1
1 1 2 2 -1
0 1 2 1 -1
0.4 1 3 2 1 -1
4 0 1 2 3 4 -1 -1 -1 1
4 3 2 7 6 4 -1 0 2 -1
4 2 4 5 7 4 1 -1 -1 -1
";

/// a 3x3 block of unit squares with the center square removed: a ring of 8
/// cells around an enclosed hole. points inside the hole are off-mesh, and
/// geodesics between opposite corners must turn at a hole corner.
pub const RING_MESH: &str = "\
mesh
2
16 8
0 0 2 0 -1
1 0 3 1 0 -1
2 0 3 2 1 -1
3 0 2 2 -1
0 1 3 3 0 -1
1 1 4 1 -1 3 0
2 1 4 2 4 -1 1
3 1 3 4 2 -1
0 2 3 5 3 -1
1 2 4 3 -1 6 5
2 2 4 4 7 6 -1
3 2 3 7 4 -1
0 3 2 5 -1
1 3 3 6 5 -1
2 3 3 7 6 -1
3 3 2 7 -1
4 0 1 5 4 4 -1 -1 1 3
4 1 2 6 5 4 0 -1 2 -1
4 2 3 7 6 4 1 -1 -1 4
4 4 5 9 8 4 -1 0 -1 5
4 6 7 11 10 4 -1 2 -1 7
4 8 9 13 12 4 -1 3 6 -1
4 9 10 14 13 4 5 -1 7 -1
4 10 11 15 14 4 6 4 -1 -1
";

/// a 2x2 room split by two zero-width walls along x = 1: one from (1, 2)
/// down to the center (1, 1), one from the center down to (1, 0.5). the four
/// rooms meet at vertex 3 = (1, 1), where two obstacle wedges make the
/// vertex ambiguous; the rooms stay connected through the gap below
/// (1, 0.5).
///
/// ```text
/// 7 ---- 8 ---- 9
/// |  P2  #  P3  |
/// 4 ---- 3 ---- 6
/// |  P0  #  P1  |
/// |      2      |
/// 0 ---- 1 ---- 5
/// ```
pub const PINCH_MESH: &str = "\
mesh
2
10 4
0 0 2 0 -1
1 0 3 1 0 -1
1 0.5 3 1 -1 0
1 1 6 3 -1 2 0 -1 1
0 1 3 2 0 -1
2 0 2 1 -1
2 1 3 3 1 -1
0 2 2 2 -1
1 2 4 2 -1 3 -1
2 2 2 3 -1
5 0 1 2 3 4 5 -1 -1 1 -1 2
5 1 5 6 3 2 5 0 -1 -1 3 -1
4 4 3 8 7 4 -1 0 -1 -1
4 3 6 9 8 4 -1 1 -1 -1
";

pub fn grid_mesh() -> Mesh {
    GRID_MESH.parse().expect("grid fixture must parse")
}

pub fn l_room_mesh() -> Mesh {
    L_ROOM_MESH.parse().expect("l-room fixture must parse")
}

pub fn ring_mesh() -> Mesh {
    RING_MESH.parse().expect("ring fixture must parse")
}

pub fn pinch_mesh() -> Mesh {
    PINCH_MESH.parse().expect("pinch fixture must parse")
}
