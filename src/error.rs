//! Error types and the last-error slot.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors surfaced by the client.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode as the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API returned an error object.
    #[error("api error ({status} {code}): {details}")]
    Api {
        status: u16,
        code: String,
        details: String,
    },

    /// The attempt budget was spent without a successful response.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl Error {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures and server errors (5xx) are retryable. Client
    /// rejections (4xx) and decode failures are not; retrying cannot change
    /// a semantic rejection.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => (500..600).contains(status),
            Self::Decode(_) | Self::RetriesExhausted { .. } => false,
        }
    }

    /// HTTP status attached to the failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Single-slot holder of the most recent terminal failure.
///
/// Every finished query writes the slot: success clears it, failure
/// replaces it. Last write wins; nothing is accumulated.
#[derive(Debug, Default)]
pub(crate) struct ErrorState {
    slot: Mutex<Option<Arc<Error>>>,
}

impl ErrorState {
    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn set(&self, error: Arc<Error>) {
        *self.lock() = Some(error);
    }

    pub fn get(&self) -> Option<Arc<Error>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Arc<Error>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let error = Error::Api {
            status: 503,
            code: "service_unavailable".into(),
            details: "down".into(),
        };
        assert!(error.is_retryable());
    }

    #[test]
    fn client_rejections_are_terminal() {
        let error = Error::Api {
            status: 404,
            code: "not_found".into(),
            details: "no such card".into(),
        };
        assert!(!error.is_retryable());
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn decode_failures_are_terminal() {
        let error = Error::Decode(serde_json::from_str::<u32>("{").unwrap_err());
        assert!(!error.is_retryable());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn slot_is_last_write_wins() {
        let state = ErrorState::default();
        assert!(state.get().is_none());

        state.set(Arc::new(Error::RetriesExhausted { attempts: 1 }));
        state.set(Arc::new(Error::Api {
            status: 500,
            code: "boom".into(),
            details: "later".into(),
        }));
        assert_eq!(state.get().unwrap().status(), Some(500));

        state.clear();
        assert!(state.get().is_none());
    }
}
