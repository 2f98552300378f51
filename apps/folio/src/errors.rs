use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a `ContentFetcher`.
///
/// These never cross the composition boundary: `compose_state` degrades any
/// of them to an empty state and logs the cause.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed content for {id}: {message}")]
    Decode { id: Uuid, message: String },
}

impl FetchError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Database(_) => "DATABASE_ERROR",
            FetchError::Decode { .. } => "DECODE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = FetchError::Decode {
            id: Uuid::nil(),
            message: "style is not an object".into(),
        };
        assert_eq!(err.code(), "DECODE_ERROR");
        assert!(err.to_string().contains("style is not an object"));
    }

    #[test]
    fn test_sqlx_error_converts() {
        let err: FetchError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
