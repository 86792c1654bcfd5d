//! Crate error types.
//!
//! The simulation itself is infallible; only persistence and configuration
//! I/O can fail, and they report through `GameError`.

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for I/O at the edges of the game.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io {
        /// File involved, when known.
        path: Option<PathBuf>,
        source: std::io::Error,
    },

    /// A persisted document could not be encoded or decoded.
    Json(serde_json::Error),
}

impl GameError {
    /// Attach the offending path to an I/O error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::Io {
            path: Some(path.into()),
            source,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io {
                path: Some(path),
                source,
            } => write!(f, "i/o error on '{}': {}", path.display(), source),
            GameError::Io { path: None, source } => write!(f, "i/o error: {}", source),
            GameError::Json(err) => write!(f, "malformed json: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            GameError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(source: std::io::Error) -> Self {
        GameError::Io { path: None, source }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Json(err)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_path() {
        let err = GameError::io_at(
            "/tmp/scores.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let text = err.to_string();
        assert!(text.contains("/tmp/scores.json"), "{text}");
        assert!(text.contains("gone"), "{text}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_json_conversion() {
        let parse: Result<u64, _> = serde_json::from_str("not json");
        let err: GameError = parse.unwrap_err().into();
        assert!(matches!(err, GameError::Json(_)));
        assert!(err.to_string().starts_with("malformed json"));
    }
}
