#[derive(thiserror::Error)]
pub enum Error {
    #[error("parse error at line {line}: {msg}")]
    ParseError { line: usize, msg: String },
    #[error("range error at line {line}: {msg}")]
    RangeError { line: usize, msg: String },
    #[error("range error in session {session}: {msg}")]
    SessionRangeError { session: usize, msg: String },
    #[error("topology error: {0}")]
    TopologyError(String),
    #[error("resolution error: {0}")]
    ResolutionError(String),
    #[error("roster error: {0}")]
    RosterError(String),
    #[error("io error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize error: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("exec error: {0}")]
    ExecError(String),
}

impl Error {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
