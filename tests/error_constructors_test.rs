use stromvarsler::error::StromError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(StromError::config("x"), StromError::Config { .. }));
    assert!(matches!(
        StromError::transport("x"),
        StromError::Transport { .. }
    ));
    assert!(matches!(
        StromError::data_unavailable("NO1", "x"),
        StromError::DataUnavailable { .. }
    ));
    assert!(matches!(StromError::web("x"), StromError::Web { .. }));
}

#[test]
fn error_constructors_group_2() {
    let ser = StromError::Serialization {
        message: "s".into(),
    };
    assert!(matches!(ser, StromError::Serialization { .. }));
    assert!(matches!(StromError::io("x"), StromError::Io { .. }));
    assert!(matches!(StromError::render("x"), StromError::Render { .. }));
    assert!(matches!(
        StromError::notification("x"),
        StromError::Notification { .. }
    ));
    assert!(matches!(
        StromError::validation("f", "m"),
        StromError::Validation { .. }
    ));
}

#[test]
fn only_missing_data_is_data_unavailable() {
    assert!(StromError::data_unavailable("NO1", "x").is_data_unavailable());
    assert!(!StromError::transport("x").is_data_unavailable());
    assert!(!StromError::render("x").is_data_unavailable());
}

#[test]
fn display_messages() {
    let e = StromError::validation("field", "bad");
    let s = format!("{}", e);
    assert!(s.contains("Validation error"));

    let io: StromError = std::io::Error::other("disk full").into();
    assert_eq!(format!("{}", io), "I/O error: disk full");
}
