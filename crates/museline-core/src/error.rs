//! Common error type for remote fetches

/// Error from a single remote call (listing or per-item detail).
///
/// Wraps either an HTTP failure (connection error or non-200 status)
/// or a local I/O error. Used by both the Met and Harvard clients.
#[derive(Debug)]
pub enum FetchError {
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Response body arrived but did not have the expected shape.
    Malformed(String),
    Io(std::io::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
            Self::Io(e) => write!(f, "IO: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Create HTTP error from a reqwest error, dropping the URL so
    /// API keys in query strings never reach the logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        let message = e.without_url().to_string();
        Self::Http { status, message }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_err(status: u16) -> FetchError {
        FetchError::Http {
            status: Some(status),
            message: "test".to_string(),
        }
    }

    #[test]
    fn display_http_with_status() {
        assert_eq!(format!("{}", http_err(404)), "HTTP 404: test");
    }

    #[test]
    fn display_http_without_status() {
        let err = FetchError::Http {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
    }

    #[test]
    fn display_malformed() {
        let err = FetchError::malformed("missing 'records' array");
        assert!(format!("{err}").contains("malformed response"));
    }

    #[test]
    fn display_io() {
        let err = FetchError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "not found",
        ));
        assert!(format!("{err}").contains("IO:"));
    }

    #[test]
    fn status_from_http() {
        assert_eq!(http_err(500).status(), Some(500));
    }

    #[test]
    fn status_none_for_malformed() {
        assert_eq!(FetchError::malformed("x").status(), None);
    }
}
