use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SplitreelError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        SplitreelError::score("x")
            .to_string()
            .contains("score error:")
    );
    assert!(
        SplitreelError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        SplitreelError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(SplitreelError::sink("x").to_string().contains("sink error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SplitreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
