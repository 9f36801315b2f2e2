use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{MAX_BLUR_RADIUS, MIN_BLUR_RADIUS};

pub const ERROR_TITLE: &str = "Error";
pub const GENERIC_ERROR_MESSAGE: &str = "An error has occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingImage,
    MissingEffect,
    InvalidParameter,
    RemoteFailure,
    TransportFailure,
}

impl FailureKind {
    /// Local failures are detected before any network I/O.
    pub fn is_local(self) -> bool {
        matches!(
            self,
            Self::MissingImage | Self::MissingEffect | Self::InvalidParameter
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no image selected")]
    MissingImage,
    #[error("no effect selected")]
    MissingEffect,
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Option<i64>,
        reason: &'static str,
    },
}

impl ValidationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingImage => FailureKind::MissingImage,
            Self::MissingEffect => FailureKind::MissingEffect,
            Self::InvalidParameter { .. } => FailureKind::InvalidParameter,
        }
    }

    pub fn user_title(&self) -> &'static str {
        ERROR_TITLE
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::MissingImage => "Please select an image first.".to_string(),
            Self::MissingEffect => "Please select an effect first.".to_string(),
            Self::InvalidParameter { value: None, .. } => {
                "Please choose a blur radius.".to_string()
            }
            Self::InvalidParameter {
                value: Some(0), ..
            } => "0 cannot be selected as blur radius. Please try again.".to_string(),
            Self::InvalidParameter {
                value: Some(value),
                ..
            } => format!(
                "{value} is not a valid blur radius. Choose a value between {MIN_BLUR_RADIUS} and {MAX_BLUR_RADIUS}."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect `{0}`; expected one of downscale, upscale, denoise, blur")]
pub struct UnknownEffect(pub String);
