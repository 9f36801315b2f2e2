use serde::{Deserialize, Serialize};

/// Form field carrying the image file on every effect route.
pub const IMAGE_FIELD: &str = "image";
/// Form field carrying the blur radius.
pub const RADIUS_FIELD: &str = "radius";

/// Body returned by the effect service. Success carries `output_url`; failures
/// carry `error` and usually `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EffectResponseBody {
    pub fn carries_error(&self) -> bool {
        self.error.is_some() || self.message.is_some()
    }
}
