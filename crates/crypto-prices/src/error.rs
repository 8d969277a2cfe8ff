//! Error Types for Price Lookup

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Error, Debug)]
pub enum LookupError {
    /// No listing entry carries the requested symbol
    #[error("Symbol '{0}' not found")]
    NotFound(String),

    /// Transport failure, rendered with its whole cause chain
    #[error("{}", with_causes(.0))]
    Network(#[from] reqwest::Error),

    #[error("ticker API returned HTTP {0}")]
    Status(u16),

    #[error("invalid ticker response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing or malformed field '{0}'")]
    MalformedField(&'static str),

    /// Failure reported by a non-HTTP ticker source
    #[error("{0}")]
    Source(String),
}

/// An error's message followed by each distinct underlying cause
pub fn with_causes(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

impl LookupError {
    /// Lookup misses are informational; everything else is a fault
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[derive(Debug)]
    struct Wrapped {
        message: &'static str,
        cause: io::Error,
    }

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.cause)
        }
    }

    #[test]
    fn test_with_causes_appends_chain() {
        let error = Wrapped {
            message: "error sending request for url (http://127.0.0.1:1/)",
            cause: io::Error::new(io::ErrorKind::ConnectionRefused, "Connection refused"),
        };
        assert_eq!(
            with_causes(&error),
            "error sending request for url (http://127.0.0.1:1/): Connection refused"
        );
    }

    #[test]
    fn test_with_causes_skips_repeated_text() {
        let error = Wrapped {
            message: "timed out: deadline elapsed",
            cause: io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed"),
        };
        assert_eq!(with_causes(&error), "timed out: deadline elapsed");
    }
}
