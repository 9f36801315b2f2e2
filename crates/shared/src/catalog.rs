//! Static description of the selectable effects and pre-submission validation.

use crate::{
    domain::{BlurRadius, Effect, EffectParameters, ImagePayload, MAX_BLUR_RADIUS, MIN_BLUR_RADIUS},
    error::ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub effect: Effect,
    pub label: &'static str,
    pub parameters: &'static [ParameterSpec],
}

const BLUR_RADIUS: ParameterSpec = ParameterSpec {
    name: "radius",
    min: MIN_BLUR_RADIUS,
    max: MAX_BLUR_RADIUS,
};

pub static CATALOG: [EffectSpec; 4] = [
    EffectSpec {
        effect: Effect::Downscale,
        label: "Downscale",
        parameters: &[],
    },
    EffectSpec {
        effect: Effect::Upscale,
        label: "Upscale",
        parameters: &[],
    },
    EffectSpec {
        effect: Effect::Denoise,
        label: "Denoise",
        parameters: &[],
    },
    EffectSpec {
        effect: Effect::Blur,
        label: "Blur",
        parameters: &[BLUR_RADIUS],
    },
];

pub fn spec_for(effect: Effect) -> &'static EffectSpec {
    match effect {
        Effect::Downscale => &CATALOG[0],
        Effect::Upscale => &CATALOG[1],
        Effect::Denoise => &CATALOG[2],
        Effect::Blur => &CATALOG[3],
    }
}

/// A selection that passed validation, ready to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedCall {
    Downscale,
    Upscale,
    Denoise,
    Blur { radius: BlurRadius },
}

impl ValidatedCall {
    pub fn effect(self) -> Effect {
        match self {
            Self::Downscale => Effect::Downscale,
            Self::Upscale => Effect::Upscale,
            Self::Denoise => Effect::Denoise,
            Self::Blur { .. } => Effect::Blur,
        }
    }
}

/// Checks image, then effect, then the effect's parameters. Pure.
pub fn validate(
    effect: Option<Effect>,
    parameters: &EffectParameters,
    image: Option<&ImagePayload>,
) -> Result<ValidatedCall, ValidationError> {
    if image.is_none() {
        return Err(ValidationError::MissingImage);
    }
    let Some(effect) = effect else {
        return Err(ValidationError::MissingEffect);
    };

    match effect {
        Effect::Downscale => Ok(ValidatedCall::Downscale),
        Effect::Upscale => Ok(ValidatedCall::Upscale),
        Effect::Denoise => Ok(ValidatedCall::Denoise),
        Effect::Blur => {
            let radius = parameters.radius.ok_or(ValidationError::InvalidParameter {
                name: BLUR_RADIUS.name,
                value: None,
                reason: "required",
            })?;
            let radius = BlurRadius::new(radius).ok_or(ValidationError::InvalidParameter {
                name: BLUR_RADIUS.name,
                value: Some(radius),
                reason: "out of range",
            })?;
            Ok(ValidatedCall::Blur { radius })
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
