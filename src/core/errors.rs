use std::path::PathBuf;

/// Errors raised while generating trace files
#[derive(Debug)]
pub enum TraceError {
    /// An output file could not be opened or written
    Io {
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    /// A repeat address was requested before any fresh address was drawn
    EmptyAddressPool,
    /// The generator configuration cannot produce a trace
    InvalidConfig(String),
}

impl TraceError {
    /// Wrap an I/O error with the path it happened on
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TraceError::Io {
            path: Some(path.into()),
            source,
        }
    }
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::Io { path: Some(path), source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            TraceError::Io { path: None, source } => write!(f, "I/O error: {}", source),
            TraceError::EmptyAddressPool => write!(f, "Address pool is empty"),
            TraceError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(source: std::io::Error) -> Self {
        TraceError::Io { path: None, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_display_includes_path() {
        let err = TraceError::io_at("out/test0.txt", io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.to_string(), "I/O error on out/test0.txt: missing");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let err: TraceError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, TraceError::Io { path: None, .. }));
        assert_eq!(err.to_string(), "I/O error: boom");
    }

    #[test]
    fn test_non_io_errors_have_no_source() {
        assert!(TraceError::EmptyAddressPool.source().is_none());
        assert_eq!(
            TraceError::InvalidConfig("file_count must be positive".to_string()).to_string(),
            "Invalid config: file_count must be positive"
        );
    }
}
