#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("mesh file does not start with the 'mesh' header")]
    MissingHeader,
    #[error("unsupported mesh version '{0}', expected 2")]
    UnsupportedVersion(String),
    #[error("mesh file ended while reading {0}")]
    UnexpectedEof(String),
    #[error("failed to parse {field} from '{value}'")]
    ParseField { field: String, value: String },
    #[error("{field} references id {value} outside of 0..{limit}")]
    IdOutOfRange {
        field: String,
        value: i64,
        limit: usize,
    },
    #[error("polygon {0} declares {1} vertices but {2} neighbors")]
    NeighborCountMismatch(usize, usize, usize),
    #[error("polygon {0} has fewer than 3 vertices")]
    DegeneratePolygon(usize),
    #[error("trailing tokens after mesh data, starting at '{0}'")]
    TrailingInput(String),
    #[error("error reading mesh input: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
