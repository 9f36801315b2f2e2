//! Contract with the remote effect service and interpretation of its replies.

use async_trait::async_trait;
use shared::{
    domain::{BlurRadius, ImagePayload, Outcome},
    error::{FailureKind, ERROR_TITLE, GENERIC_ERROR_MESSAGE},
    protocol::EffectResponseBody,
};
use thiserror::Error;

/// One network call per effect. Implementations own transport concerns such
/// as timeouts; callers never retry.
#[async_trait]
pub trait RemoteEffectClient: Send + Sync {
    async fn downscale(&self, image: &ImagePayload) -> Result<String, RemoteError>;
    async fn upscale(&self, image: &ImagePayload) -> Result<String, RemoteError>;
    async fn denoise(&self, image: &ImagePayload) -> Result<String, RemoteError>;
    async fn blur(&self, image: &ImagePayload, radius: BlurRadius) -> Result<String, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("effect service returned {status}: {title}: {message}")]
    Service {
        status: u16,
        title: String,
        message: String,
    },
    #[error("malformed effect service response ({status}): {reason}")]
    Malformed { status: u16, reason: String },
    #[error("effect service unreachable: {0}")]
    Transport(String),
}

impl RemoteError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Service { .. } => FailureKind::RemoteFailure,
            Self::Malformed { .. } | Self::Transport(_) => FailureKind::TransportFailure,
        }
    }

    /// Service errors surface verbatim; everything else gets the generic pair.
    pub fn into_outcome(self) -> Outcome {
        let kind = self.kind();
        match self {
            Self::Service { title, message, .. } => Outcome::failure(kind, title, message),
            Self::Malformed { .. } | Self::Transport(_) => {
                Outcome::failure(kind, ERROR_TITLE, GENERIC_ERROR_MESSAGE)
            }
        }
    }
}

/// Maps a status code and raw body to the output reference or a `RemoteError`.
///
/// A body carrying `error`/`message` is a service error whatever the status;
/// a success status without a usable `output_url` is malformed.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<String, RemoteError> {
    let is_success = (200..300).contains(&status);
    let parsed = match serde_json::from_slice::<EffectResponseBody>(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(RemoteError::Malformed {
                status,
                reason: format!("unparseable body: {err}"),
            })
        }
    };

    if parsed.carries_error() {
        return Err(RemoteError::Service {
            status,
            title: non_blank(parsed.error).unwrap_or_else(|| ERROR_TITLE.to_string()),
            message: non_blank(parsed.message)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        });
    }

    match non_blank(parsed.output_url) {
        Some(output_url) if is_success => Ok(output_url),
        Some(_) => Err(RemoteError::Malformed {
            status,
            reason: "output_url on a non-success status".to_string(),
        }),
        None => Err(RemoteError::Malformed {
            status,
            reason: "missing output_url".to_string(),
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
