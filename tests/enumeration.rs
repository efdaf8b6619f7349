mod common;

use tabs::enumeration::EnumValueType;
use tabs::error::TabsError;
use tabs::registry::{new_enum, new_enum_without_void};
use tabs::valuetype::{ValueType, VOID};

#[test]
fn interning_is_deterministic() {
    common::init_tracing();
    let b = new_enum("enum_test_bool", &["t", "f"]);
    assert_eq!(b.parse("t").unwrap(), 1);
    assert_eq!(b.parse("f").unwrap(), 2);
    assert_eq!(b.parse("t").unwrap(), 1);
    assert_eq!(b.len(), 2);
}

#[test]
fn unseen_labels_get_the_next_code() {
    let colors = EnumValueType::new("colors", true);
    colors.prime(&["red", "green"]).unwrap();
    assert_eq!(colors.parse("blue").unwrap(), 3);
    assert_eq!(colors.parse("green").unwrap(), 2);
    assert_eq!(colors.parse("cyan").unwrap(), 4);
    assert_eq!(colors.labels(), vec!["red", "green", "blue", "cyan"]);
}

#[test]
fn completed_enumeration_rejects_unknown_labels() {
    let e = new_enum("enum_test_latch", &["true", "false"]);
    assert!(!e.is_complete());
    e.complete();
    assert!(e.is_complete());
    assert_eq!(e.parse("false").unwrap(), 2);
    let err = e.parse("u").unwrap_err();
    assert_eq!(
        err,
        TabsError::UnknownLabel {
            value_type: "enum_test_latch".to_string(),
            label: "u".to_string()
        }
    );
    // the failed parse did not grow the label set
    assert_eq!(e.len(), 2);
    assert!(!e.valid(3));
    // completing twice is harmless
    e.complete();
    assert!(e.is_complete());
}

#[test]
fn void_handling() {
    let with_void = EnumValueType::new("with_void", true);
    assert_eq!(with_void.parse("").unwrap(), VOID);
    assert_eq!(with_void.emit(VOID), "");
    assert!(with_void.valid(VOID));
    assert!(with_void.is_empty());

    let without = new_enum_without_void("enum_test_no_void", &["on", "off"]);
    assert!(!without.has_void());
    assert!(matches!(
        without.parse(""),
        Err(TabsError::EmptyDisallowed { .. })
    ));
    assert!(!without.valid(VOID));
    assert_eq!(without.len(), 2);
}

#[test]
fn empty_label_in_priming_is_void_not_interned() {
    let e = EnumValueType::new("sparse", true);
    e.prime(&["a", "", "b"]).unwrap();
    assert_eq!(e.len(), 2);
    assert_eq!(e.parse("b").unwrap(), 2);
}

#[test]
fn valid_tracks_current_size() {
    let e = EnumValueType::new("growing", true);
    e.prime(&["x", "y", "z"]).unwrap();
    assert!(e.valid(0));
    for code in 1..=3 {
        assert!(e.valid(code));
    }
    assert!(!e.valid(4));
    e.parse("w").unwrap();
    assert!(e.valid(4));
    assert!(!e.valid(5));
}

#[test]
fn emit_is_total() {
    let e = EnumValueType::new("total", true);
    e.prime(&["only"]).unwrap();
    assert_eq!(e.emit(1), "only");
    assert_eq!(e.emit(2), "");
    assert_eq!(e.emit(u64::MAX), "");
}

#[test]
fn round_trips_both_ways() {
    let e = EnumValueType::new("trip", false);
    let labels = ["alpha", "beta", " spaced ", "Alpha"];
    e.prime(&labels).unwrap();
    for label in labels {
        assert_eq!(e.emit(e.parse(label).unwrap()), label);
    }
    for code in 1..=e.len() as u64 {
        assert_eq!(e.parse(&e.emit(code)).unwrap(), code);
    }
}

#[test]
fn labels_are_case_sensitive() {
    let e = EnumValueType::new("cased", true);
    assert_eq!(e.parse("Yes").unwrap(), 1);
    assert_eq!(e.parse("yes").unwrap(), 2);
    assert_eq!(e.code("YES"), None);
}

#[test]
fn display_lists_labels_in_code_order() {
    let e = EnumValueType::new("bool", true);
    e.prime(&["true", "false"]).unwrap();
    assert_eq!(e.to_string(), "bool{true, false}");
}

#[test]
fn concurrent_interning_hands_out_each_code_once() {
    use std::sync::Arc;
    let e = Arc::new(EnumValueType::new("shared", true));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let e = Arc::clone(&e);
            std::thread::spawn(move || {
                for n in 0..100 {
                    e.parse(&format!("label{n}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(e.len(), 100);
    for code in 1..=100 {
        assert_eq!(e.parse(&e.emit(code)).unwrap(), code);
    }
}
