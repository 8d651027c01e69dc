use navmesh_knn_core::model::mesh::MeshError;
use navmesh_knn_core::util::fs::read_utils::PointsError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to read mesh file '{path}': {source}")]
    MeshFailure {
        path: String,
        #[source]
        source: MeshError,
    },
    #[error("failed to read points file '{path}': {source}")]
    PointsFailure {
        path: String,
        #[source]
        source: PointsError,
    },
    #[error("i/o failure: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("engines disagree for start ({x}, {y}) with k = {k}; query dumped above")]
    EngineMismatch { x: f64, y: f64, k: usize },
}
