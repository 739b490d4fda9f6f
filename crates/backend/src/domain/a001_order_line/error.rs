use thiserror::Error;

/// Ошибки загрузки датасета
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: invalid value {value:?} in column {column}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}
