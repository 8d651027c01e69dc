mod dams;
mod engine;
mod fence;
mod goal_index;
mod heuristic;
mod target;

pub use dams::{Dam, DamTable};
pub use engine::KnnSearch;
pub use fence::FenceHeuristic;
pub use goal_index::{GoalEntry, GoalIndex};
pub use heuristic::{GoalHeuristic, ZeroHeuristic};
pub use target::TargetHeuristic;
