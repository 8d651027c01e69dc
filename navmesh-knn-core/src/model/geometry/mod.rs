mod ops;
mod point;

pub use ops::{
    h_value, in_sector, is_collinear, lerp, line_intersection_params, orientation,
    point_segment_distance, reflect_point, segments_intersect, vector_angle, Orientation,
};
pub use point::{Point, EPSILON};
