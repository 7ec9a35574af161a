use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WaveFillError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        WaveFillError::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        WaveFillError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WaveFillError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
