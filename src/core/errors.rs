use std::path::PathBuf;

/// Errors that can occur while writing, loading or configuring snapshots
#[derive(Debug)]
pub enum PipelineError {
    /// A required snapshot table could not be located
    MissingInput(PathBuf),
    /// Reading or writing a snapshot file failed
    Io(std::io::Error),
    /// A snapshot table could not be encoded or decoded
    Csv(csv::Error),
    /// A snapshot table does not carry the expected columns
    UnexpectedColumns { path: PathBuf, found: Vec<String> },
    /// Generation parameters were rejected
    InvalidConfig(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MissingInput(path) => {
                write!(f, "Snapshot table not found: {}", path.display())
            }
            PipelineError::Io(err) => write!(f, "Snapshot I/O failed: {}", err),
            PipelineError::Csv(err) => write!(f, "Malformed snapshot table: {}", err),
            PipelineError::UnexpectedColumns { path, found } => write!(
                f,
                "Unexpected columns in {}: {}",
                path.display(),
                found.join(", ")
            ),
            PipelineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io(err) => Some(err),
            PipelineError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err)
    }
}

impl PipelineError {
    /// Whether the error means the snapshot has not been generated yet
    pub fn is_missing_input(&self) -> bool {
        matches!(self, PipelineError::MissingInput(_))
    }
}
