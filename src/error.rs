use thiserror::Error;

/// Errors surfaced by distance and sorting operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A latitude, longitude or radius is out of range or not finite.
    #[error("invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },
    /// A place record has no usable coordinates.
    #[error("invalid place at index {index}: {reason}")]
    InvalidPlace { index: usize, reason: String },
    /// The CSV header lacks a required column.
    #[error("missing column '{0}' in CSV header")]
    MissingColumn(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
