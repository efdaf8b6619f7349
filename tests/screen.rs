use std::sync::Arc;

use tabs::enumeration::EnumValueType;
use tabs::error::TabsError;
use tabs::screen::Screened;
use tabs::valuetype::{Idented, ValueType, VersionValueType};

#[test]
fn rejected_labels_are_never_interned() {
    let inner = Arc::new(EnumValueType::new("keys", true));
    let keys = Screened::identifier(inner.clone());
    assert_eq!(keys.ident(), "keys");
    assert_eq!(keys.data_type(), "Screened");
    assert_eq!(keys.parse("user_id").unwrap(), 1);
    assert!(matches!(keys.parse("user id"), Err(TabsError::Parse { .. })));
    assert!(matches!(keys.parse("9lives"), Err(TabsError::Parse { .. })));
    assert_eq!(inner.len(), 1);
    assert_eq!(keys.parse("").unwrap(), 0);
    assert_eq!(keys.emit(1), "user_id");
    assert!(keys.valid(1));
    assert!(!keys.valid(2));
}

#[test]
fn custom_patterns_screen_normalized_text() {
    let builds = Screened::new(
        Arc::new(VersionValueType::new("release")),
        r"^\d{2}\.\d\.\d\.\d{5}$",
    )
    .unwrap();
    assert_eq!(builds.parse(" 20.1.0.13623 ").unwrap(), 201013623);
    assert!(matches!(
        builds.parse(".20.1.0.13623"),
        Err(TabsError::Parse { .. })
    ));
    let mut text = String::from(" 20.1.0.13623");
    builds.validate(&mut text).unwrap();
    assert_eq!(text, "20.1.0.13623");
    assert_eq!(builds.inner().ident(), "release");
}

#[test]
fn bad_patterns_are_config_errors() {
    let inner = Arc::new(EnumValueType::new("any", true));
    assert!(matches!(
        Screened::new(inner, "(unclosed"),
        Err(TabsError::Config(_))
    ));
}
