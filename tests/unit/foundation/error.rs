use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VignetteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VignetteError::layout("x").to_string().contains("layout error:"));
    assert!(VignetteError::cache("x").to_string().contains("cache error:"));
    assert!(
        VignetteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VignetteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
