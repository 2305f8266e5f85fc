use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntropyError {
    #[error("Cannot estimate entropy of an empty sequence")]
    EmptyInput,
    #[error("Invalid coordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("Missing column \"{0}\" in header")]
    MissingColumn(&'static str),
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Unable to read records")]
    Io(#[from] std::io::Error),
}
