use super::*;

#[test]
fn success_body_yields_output_url() {
    let body = br#"{"output_url":"http://x/1.png"}"#;
    assert_eq!(interpret_response(200, body), Ok("http://x/1.png".to_string()));
}

#[test]
fn structured_error_is_kept_verbatim() {
    let body = br#"{"error":"BadImage","message":"unsupported format"}"#;
    let err = interpret_response(500, body).unwrap_err();
    assert_eq!(
        err,
        RemoteError::Service {
            status: 500,
            title: "BadImage".into(),
            message: "unsupported format".into(),
        }
    );
    assert_eq!(
        err.into_outcome(),
        Outcome::failure(FailureKind::RemoteFailure, "BadImage", "unsupported format")
    );
}

#[test]
fn error_without_message_falls_back_per_field() {
    let body = br#"{"error":"No image file provided."}"#;
    let outcome = interpret_response(400, body).unwrap_err().into_outcome();
    assert_eq!(
        outcome,
        Outcome::failure(
            FailureKind::RemoteFailure,
            "No image file provided.",
            "An error has occurred"
        )
    );
}

#[test]
fn error_field_wins_over_success_status() {
    let body = br#"{"output_url":"http://x/1.png","error":"Partial","message":"half done"}"#;
    assert!(matches!(
        interpret_response(200, body),
        Err(RemoteError::Service { .. })
    ));
}

#[test]
fn unparseable_body_maps_to_generic_failure() {
    for (status, body) in [
        (500u16, &b"<html>Internal Server Error</html>"[..]),
        (502, &b""[..]),
        (200, &b"not json"[..]),
    ] {
        let err = interpret_response(status, body).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed { .. }), "{err:?}");
        assert_eq!(
            err.into_outcome(),
            Outcome::failure(FailureKind::TransportFailure, "Error", "An error has occurred")
        );
    }
}

#[test]
fn success_without_output_url_is_malformed() {
    for body in [&b"{}"[..], &br#"{"output_url":"  "}"#[..]] {
        assert!(matches!(
            interpret_response(200, body),
            Err(RemoteError::Malformed { status: 200, .. })
        ));
    }
}

#[test]
fn output_url_on_error_status_is_not_success() {
    let body = br#"{"output_url":"http://x/1.png"}"#;
    assert!(matches!(
        interpret_response(503, body),
        Err(RemoteError::Malformed { status: 503, .. })
    ));
}

#[test]
fn transport_errors_use_generic_pair() {
    let outcome = RemoteError::Transport("connection refused".into()).into_outcome();
    assert_eq!(
        outcome,
        Outcome::failure(FailureKind::TransportFailure, "Error", "An error has occurred")
    );
}
