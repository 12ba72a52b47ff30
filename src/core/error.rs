//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A sink rejected a finished line
    #[error("Sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A level label that cannot be rendered as `[LABEL]`
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),
}

impl LoggerError {
    /// Create a sink write error carrying the sink's name
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(label: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(label.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("NameFormat", "missing placeholder");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::invalid_level("IN FO");
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("NameFormat", "template has no '{}' placeholder");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for NameFormat: template has no '{}' placeholder"
        );

        let err = LoggerError::invalid_level("");
        assert_eq!(err.to_string(), "Invalid log level: ''");
    }

    #[test]
    fn test_sink_write_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::sink_write("stdout", io_err);

        assert!(matches!(err, LoggerError::SinkWrite { .. }));
        assert!(err.to_string().contains("stdout"));
        assert!(err.to_string().contains("pipe closed"));
    }
}
