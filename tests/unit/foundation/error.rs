use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FeatherError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FeatherError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        FeatherError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(FeatherError::filter("x").to_string().contains("filter error:"));
    assert!(
        FeatherError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FeatherError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn resource_exhaustion_covers_allocation_and_filter() {
    assert!(FeatherError::allocation("oom").is_resource_exhaustion());
    assert!(FeatherError::filter("init").is_resource_exhaustion());
    assert!(!FeatherError::validation("bad").is_resource_exhaustion());
}
