use thiserror::Error;

/// Top-level error type for the linework geometry engine.
#[derive(Debug, Error)]
pub enum LineworkError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors raised while constructing shapes or running geometry operators.
///
/// Degenerate inputs inside the algorithms themselves never produce these;
/// they surface as `None` or empty results instead.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} must be positive")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("polygon needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },
}

/// Errors related to mesh construction and path extraction.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("non-finite vertex ({x}, {y})")]
    NonFiniteVertex { x: f64, y: f64 },

    #[error("node does not belong to this mesh")]
    UnknownNode,
}

/// Errors related to document export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("failed to serialize diagnostics")]
    Diagnostics(#[source] serde_json::Error),
}

/// Convenience type alias for results using [`LineworkError`].
pub type Result<T> = std::result::Result<T, LineworkError>;
