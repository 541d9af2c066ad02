use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ReelError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let bad = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
    let err: ReelError = bad.into();
    assert!(matches!(err, ReelError::Serde(_)));
}
