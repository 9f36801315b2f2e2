use super::*;
use crate::error::FailureKind;

fn image() -> ImagePayload {
    ImagePayload::new(b"\x89PNG fake".to_vec(), "cat.png")
}

#[test]
fn missing_image_is_reported_before_missing_effect() {
    let err = validate(None, &EffectParameters::default(), None).unwrap_err();
    assert_eq!(err, ValidationError::MissingImage);
    assert_eq!(err.kind(), FailureKind::MissingImage);
}

#[test]
fn missing_effect_is_rejected() {
    let image = image();
    let err = validate(None, &EffectParameters::default(), Some(&image)).unwrap_err();
    assert_eq!(err, ValidationError::MissingEffect);
}

#[test]
fn blur_without_radius_is_rejected() {
    let image = image();
    let err = validate(
        Some(Effect::Blur),
        &EffectParameters::default(),
        Some(&image),
    )
    .unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidParameter);
    assert_eq!(err.user_message(), "Please choose a blur radius.");
}

#[test]
fn blur_radius_zero_has_dedicated_message() {
    let image = image();
    let err = validate(
        Some(Effect::Blur),
        &EffectParameters::with_radius(0),
        Some(&image),
    )
    .unwrap_err();
    assert_eq!(err.user_title(), "Error");
    assert_eq!(
        err.user_message(),
        "0 cannot be selected as blur radius. Please try again."
    );
}

#[test]
fn every_radius_in_range_validates() {
    let image = image();
    for radius in MIN_BLUR_RADIUS..=MAX_BLUR_RADIUS {
        let call = validate(
            Some(Effect::Blur),
            &EffectParameters::with_radius(radius),
            Some(&image),
        )
        .unwrap_or_else(|err| panic!("radius {radius} rejected: {err}"));
        match call {
            ValidatedCall::Blur { radius: validated } => {
                assert_eq!(i64::from(validated.get()), radius)
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}

#[test]
fn radius_outside_range_fails() {
    let image = image();
    for radius in [i64::MIN, -100, -1, 0, 101, 255, 256, i64::MAX] {
        let err = validate(
            Some(Effect::Blur),
            &EffectParameters::with_radius(radius),
            Some(&image),
        )
        .unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidParameter { value: Some(v), .. } if v == radius),
            "radius {radius} produced {err:?}"
        );
    }
}

#[test]
fn out_of_range_radius_message_names_the_bounds() {
    let image = image();
    let err = validate(
        Some(Effect::Blur),
        &EffectParameters::with_radius(150),
        Some(&image),
    )
    .unwrap_err();
    assert_eq!(
        err.user_message(),
        "150 is not a valid blur radius. Choose a value between 1 and 100."
    );
}

#[test]
fn non_blur_effects_ignore_radius() {
    let image = image();
    for effect in [Effect::Downscale, Effect::Upscale, Effect::Denoise] {
        for params in [
            EffectParameters::default(),
            EffectParameters::with_radius(0),
            EffectParameters::with_radius(-7),
            EffectParameters::with_radius(5_000),
        ] {
            let call = validate(Some(effect), &params, Some(&image)).expect("valid");
            assert_eq!(call.effect(), effect);
        }
    }
}

#[test]
fn only_blur_declares_parameters() {
    for spec in CATALOG.iter() {
        assert_eq!(spec_for(spec.effect), spec);
        if spec.effect == Effect::Blur {
            assert_eq!(spec.parameters.len(), 1);
            assert_eq!(spec.parameters[0].name, "radius");
            assert_eq!((spec.parameters[0].min, spec.parameters[0].max), (1, 100));
        } else {
            assert!(spec.parameters.is_empty());
        }
    }
}
