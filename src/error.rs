// Typed errors at the library boundary.
//
// LoadError is fatal at startup: the server refuses to come up with a
// partially loaded catalog or matrix. RecommendError is recoverable and maps
// to a 404 / 400 in the web layer.

/// Artifact loading and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} has unsupported artifact version {found}")]
    UnsupportedVersion { path: String, found: u32 },

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("duplicate item id '{0}' in catalog")]
    DuplicateId(String),

    #[error("similarity matrix is not square: {ids} ids, row {row} has {len} entries")]
    NotSquare { ids: usize, row: usize, len: usize },

    #[error("similarity matrix covers {matrix} items but the catalog has {catalog}")]
    DimensionMismatch { matrix: usize, catalog: usize },

    #[error("similarity matrix id '{matrix}' at position {position} does not match catalog id '{catalog}'")]
    IdMismatch {
        position: usize,
        matrix: String,
        catalog: String,
    },

    #[error("invalid similarity score {value} at ({row}, {col}); scores must be finite and within [0, 1]")]
    InvalidScore { row: usize, col: usize, value: f64 },
}

/// Recoverable query errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendError {
    #[error("no such item: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type RecommendResult<T> = Result<T, RecommendError>;
