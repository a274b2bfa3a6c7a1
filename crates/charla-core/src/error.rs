use thiserror::Error;

/// Top-level error type for the Charla system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for CharlaError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CharlaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CharlaError {
    fn from(err: toml::de::Error) -> Self {
        CharlaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CharlaError {
    fn from(err: toml::ser::Error) -> Self {
        CharlaError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Charla operations.
pub type Result<T> = std::result::Result<T, CharlaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CharlaError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = CharlaError::Session("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Session error: lock poisoned");

        let err = CharlaError::Gateway("backend unavailable".to_string());
        assert_eq!(err.to_string(), "Gateway error: backend unavailable");

        let err = CharlaError::Transport("send failed".to_string());
        assert_eq!(err.to_string(), "Transport error: send failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CharlaError = io_err.into();
        assert!(matches!(err, CharlaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(parsed.is_err());
        let err: CharlaError = parsed.unwrap_err().into();
        assert!(matches!(err, CharlaError::Config(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = CharlaError::Dialog("unknown state".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Dialog"));
        assert!(debug_str.contains("unknown state"));
    }
}
