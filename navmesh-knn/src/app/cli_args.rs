use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "navmesh-knn",
    about = "geodesic k-nearest-neighbor queries over navigation meshes"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// answer kNN queries with one engine and print a result table
    Run {
        /// mesh file (text format, version 2)
        #[arg(long)]
        mesh: PathBuf,
        /// goal set: a count followed by x y pairs
        #[arg(long)]
        goals: PathBuf,
        /// start set, same format as the goals
        #[arg(long)]
        starts: PathBuf,
        #[arg(long, default_value_t = 1)]
        k: usize,
        #[arg(long, value_enum, default_value_t = EngineKind::Fence)]
        engine: EngineKind,
        /// wall-clock budget per query, in microseconds
        #[arg(long)]
        time_limit_micros: Option<u64>,
        /// also print the path polyline of every sealed goal
        #[arg(long)]
        paths: bool,
        /// emit one JSON object per query instead of the CSV table
        #[arg(long)]
        json: bool,
    },
    /// run every engine plus the brute-force oracle on the same queries and
    /// fail loudly if any pair disagrees
    Compare {
        #[arg(long)]
        mesh: PathBuf,
        #[arg(long)]
        goals: PathBuf,
        #[arg(long)]
        starts: PathBuf,
        #[arg(long, default_value_t = 1)]
        k: usize,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum EngineKind {
    Blind,
    Target,
    Fence,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Blind => write!(f, "blind"),
            EngineKind::Target => write!(f, "target"),
            EngineKind::Fence => write!(f, "fence"),
        }
    }
}
