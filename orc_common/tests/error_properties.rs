//! Property tests for the error taxonomy.
//!
//! Covers message preservation for arbitrary text (including empty strings,
//! non-ASCII and control characters), clone independence, kind distinctness
//! and the display/serde round trips.

use orc_common::error::{ErrorKind, FormatError};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = ErrorKind> {
    prop_oneof![
        Just(ErrorKind::NotImplemented),
        Just(ErrorKind::ParseError),
        Just(ErrorKind::InvalidArgument),
    ]
}

/// Text mixing ASCII, control characters and multi-byte code points.
fn any_message() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[\\x00-\\x1f]{0,8}",
        "\\PC{0,64}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn message_is_preserved(kind in any_kind(), text in any_message()) {
        let err = FormatError::new(kind, text.as_str());
        prop_assert_eq!(err.kind(), kind);
        prop_assert_eq!(err.message(), text.as_str());

        let from_owned = FormatError::new(kind, text.clone());
        prop_assert_eq!(from_owned, err);
    }

    #[test]
    fn clone_is_independent(kind in any_kind(), text in any_message()) {
        let original = FormatError::new(kind, text.as_str());
        let copy = original.clone();
        drop(original);
        prop_assert_eq!(copy.kind(), kind);
        prop_assert_eq!(copy.message(), text.as_str());
    }

    #[test]
    fn kinds_never_collide(text in any_message()) {
        let a = FormatError::not_implemented(text.as_str());
        let b = FormatError::parse_error(text.as_str());
        let c = FormatError::invalid_argument(text.as_str());
        prop_assert_ne!(a.kind(), b.kind());
        prop_assert_ne!(b.kind(), c.kind());
        prop_assert_ne!(a.kind(), c.kind());
        prop_assert_ne!(&a, &b);
        prop_assert_ne!(&b, &c);
    }

    #[test]
    fn display_recovers_kind(kind in any_kind(), text in any_message()) {
        let line = FormatError::new(kind, text).to_string();
        prop_assert_eq!(ErrorKind::from_display(&line), Some(kind));
    }

    #[test]
    fn json_record_roundtrip(kind in any_kind(), text in any_message()) {
        let err = FormatError::new(kind, text);
        let json = serde_json::to_string(&err).unwrap();
        let back: FormatError = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, err);
    }
}
