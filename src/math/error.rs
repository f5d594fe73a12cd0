// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },

    #[error("Index {index} out of range for {table} table of length {len}")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Malformed Voronoi diagram: {reason}")]
    MalformedDiagram { reason: String },

    #[error("Point set '{role}' is empty")]
    EmptyPointSet { role: &'static str },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

pub type MathResult<T> = Result<T, MathError>;
