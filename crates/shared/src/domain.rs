use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FailureKind, UnknownEffect};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(SubmissionId);

/// One of the four transformations the remote service offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Downscale,
    Upscale,
    Denoise,
    Blur,
}

impl Effect {
    pub const ALL: [Effect; 4] = [
        Effect::Downscale,
        Effect::Upscale,
        Effect::Denoise,
        Effect::Blur,
    ];

    /// Wire id, also used as the route segment on the remote service.
    pub fn id(self) -> &'static str {
        match self {
            Effect::Downscale => "downscale",
            Effect::Upscale => "upscale",
            Effect::Denoise => "denoise",
            Effect::Blur => "blur",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Effect::ALL
            .into_iter()
            .find(|effect| effect.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

pub const MIN_BLUR_RADIUS: i64 = 1;
pub const MAX_BLUR_RADIUS: i64 = 100;

/// A blur radius already checked against `[MIN_BLUR_RADIUS, MAX_BLUR_RADIUS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlurRadius(u8);

impl BlurRadius {
    pub fn new(raw: i64) -> Option<Self> {
        if (MIN_BLUR_RADIUS..=MAX_BLUR_RADIUS).contains(&raw) {
            u8::try_from(raw).ok().map(Self)
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for BlurRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw, unvalidated parameter input. Only blur reads `radius`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<i64>,
}

impl EffectParameters {
    pub fn with_radius(radius: i64) -> Self {
        Self {
            radius: Some(radius),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Arc<[u8]>,
    pub filename: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Arc<[u8]>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        output_reference: String,
    },
    Failure {
        kind: FailureKind,
        title: String,
        message: String,
    },
}

impl Outcome {
    pub fn success(output_reference: impl Into<String>) -> Self {
        Self::Success {
            output_reference: output_reference.into(),
        }
    }

    pub fn failure(
        kind: FailureKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Failure {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Where the caller should go after this outcome.
    pub fn navigation(&self) -> Navigation {
        match self {
            Self::Success { output_reference } => Navigation::ShowResult {
                output_reference: output_reference.clone(),
            },
            Self::Failure {
                kind,
                title,
                message,
            } if kind.is_local() => Navigation::StayOnSelection {
                title: title.clone(),
                message: message.clone(),
            },
            Self::Failure { title, message, .. } => Navigation::ReturnToUpload {
                title: title.clone(),
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Navigation {
    ShowResult { output_reference: String },
    /// Dismissible notification over the selection step; nothing was sent.
    StayOnSelection { title: String, message: String },
    ReturnToUpload { title: String, message: String },
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
