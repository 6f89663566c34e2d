use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use rstest::rstest;

use super::*;
use crate::error::RequiredPropertyError;

fn type_error(expected: ValueKind, actual: ValueKind, offset: usize, nullable: bool) -> Error {
    Error::Type(TypeError {
        expected,
        actual,
        offset,
        nullable,
    })
}

fn syntax_kind(err: &Error) -> SyntaxErrorKind {
    match err {
        Error::Syntax(e) => e.kind,
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn scalars() {
    assert_eq!(Reader::new(b"null").null(), Ok(()));
    assert_eq!(Reader::new(b"true").bool(), Ok(true));
    assert_eq!(Reader::new(b" false ").bool(), Ok(false));
    assert_eq!(Reader::new(b"-12").int(), Ok(-12));
    assert_eq!(Reader::new(b"2.5").float(), Ok(2.5));
    assert_eq!(Reader::new(br#""abc""#).string().unwrap(), "abc");
}

#[rstest]
#[case("1.9", 1)]
#[case("-1.9", -1)]
#[case("1e30", i64::MAX)]
#[case("-1e30", i64::MIN)]
fn int_truncates(#[case] input: &str, #[case] expected: i64) {
    assert_eq!(Reader::from(input).int(), Ok(expected));
}

#[test]
fn string_with_escapes() {
    let mut r = Reader::new(br#""a \"good\" string""#);
    assert_eq!(r.string().unwrap(), r#"a "good" string"#);
    assert_eq!(r.require_eof(), Ok(()));
}

#[rstest]
#[case("null", None)]
#[case("true", Some(true))]
#[case(" false", Some(false))]
fn bool_or_null(#[case] input: &str, #[case] expected: Option<bool>) {
    assert_eq!(Reader::from(input).bool_or_null(), Ok(expected));
}

#[test]
fn nullable_reads() {
    assert_eq!(Reader::new(b"null").int_or_null(), Ok(None));
    assert_eq!(Reader::new(b"7").int_or_null(), Ok(Some(7)));
    assert_eq!(Reader::new(b"null").float_or_null(), Ok(None));
    assert_eq!(Reader::new(b"0.5").float_or_null(), Ok(Some(0.5)));
    assert_eq!(Reader::new(b"null").string_or_null(), Ok(None));
    assert_eq!(
        Reader::new(br#""s""#).string_or_null(),
        Ok(Some(Cow::Borrowed("s")))
    );
    assert!(Reader::new(b"null").array_or_null().unwrap().is_none());
    assert!(Reader::new(b"null").object_or_null().unwrap().is_none());
}

#[test]
fn nullable_type_error_mentions_null() {
    let mut r = Reader::new(br#"  "abc""#);
    let err = r.bool_or_null().unwrap_err();
    assert_eq!(err, type_error(ValueKind::Bool, ValueKind::String, 2, true));
    insta::assert_snapshot!(err.to_string(), @"expected boolean or null, got string at position 2");
}

#[rstest]
#[case("true", ValueKind::Bool)]
#[case("1", ValueKind::Number)]
#[case(r#""x""#, ValueKind::String)]
#[case("[null]", ValueKind::Array)]
#[case("{}", ValueKind::Object)]
fn null_type_errors(#[case] input: &str, #[case] actual: ValueKind) {
    let mut r = Reader::from(input);
    assert_eq!(r.null(), Err(type_error(ValueKind::Null, actual, 0, false)));
}

#[rstest]
#[case("bad")]
#[case("+")]
#[case("]")]
#[case("}")]
#[case("")]
fn null_reports_malformed_input(#[case] input: &str) {
    let err = Reader::from(input).null().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "{err:?}");
}

#[rstest]
#[case("null", ValueKind::Null)]
#[case("true", ValueKind::Bool)]
#[case("{}", ValueKind::Object)]
fn array_type_errors(#[case] input: &str, #[case] actual: ValueKind) {
    let mut r = Reader::from(input);
    let err = r.array().err().unwrap();
    assert_eq!(err, type_error(ValueKind::Array, actual, 0, false));
    assert_eq!(r.error(), Some(&err));
}

#[test]
fn object_or_null_type_error() {
    let mut r = Reader::new(b"[]");
    let err = r.object_or_null().err().unwrap();
    assert_eq!(err, type_error(ValueKind::Object, ValueKind::Array, 0, true));
}

#[test]
fn trailing_data_is_rejected() {
    let mut r = Reader::new(br#"100,"extra""#);
    assert_eq!(r.int(), Ok(100));
    let err = r.require_eof().unwrap_err();
    assert_eq!(syntax_kind(&err), SyntaxErrorKind::DataAfterEnd);
    assert_eq!(err.offset(), Some(3));
    assert_eq!(r.error(), Some(&err));
}

#[test]
fn trailing_whitespace_is_fine() {
    let mut r = Reader::new(b" [ ] \n\t");
    let mut arr = r.array().unwrap();
    assert!(arr.next().is_none());
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn errors_are_sticky() {
    let mut r = Reader::new(br#"[true, 1, "x"]"#);
    let mut arr = r.array().unwrap();
    let first = arr.next().unwrap().string().unwrap_err();
    assert!(arr.next().is_none());
    assert!(!arr.is_defined());
    assert_eq!(r.bool(), Err(first.clone()));
    assert_eq!(r.int(), Err(first.clone()));
    assert_eq!(r.skip_value(), Err(first.clone()));
    assert_eq!(r.require_eof(), Err(first.clone()));
    assert!(r.array().is_err());
    assert!(r.any().is_err());
    assert_eq!(r.error(), Some(&first));
}

#[test]
fn first_error_wins() {
    let mut r = Reader::new(b"1");
    let injected = Error::msg("not allowed");
    r.add_error(injected.clone());
    r.add_error(Error::msg("second"));
    assert_eq!(r.error(), Some(&injected));
    assert_eq!(r.int(), Err(injected));
}

#[test]
fn array_of_ints() {
    let mut r = Reader::new(b"[1, 2, 3]");
    let mut values = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        values.push(r.int().unwrap());
    }
    assert_eq!(values, [1, 2, 3]);
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn empty_containers() {
    let mut r = Reader::new(b"[]");
    let mut arr = r.array().unwrap();
    assert!(arr.is_defined());
    assert!(arr.next().is_none());
    assert!(!arr.is_defined());

    let mut r = Reader::new(b" { } ");
    let mut obj = r.object().unwrap();
    assert!(obj.next().is_none());
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn nested_arrays() {
    let mut r = Reader::new(b"[1,[2,3],4]");
    let mut outer = Vec::new();
    let mut inner = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        match r.any().unwrap() {
            AnyValue::Number(n) => outer.push(n),
            AnyValue::Array(mut nested) => {
                while let Some(r) = nested.next() {
                    inner.push(r.int().unwrap());
                }
            }
            _ => unreachable!(),
        }
    }
    assert_eq!(outer, [1.0, 4.0]);
    assert_eq!(inner, [2, 3]);
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn error_injected_mid_array() {
    let mut r = Reader::new(b"[1,2,3,4,5]");
    let injected = Error::msg("enough");
    let mut values = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        let n = r.int().unwrap();
        values.push(n);
        if n == 2 {
            r.add_error(injected.clone());
        }
    }
    assert_eq!(values, [1, 2]);
    assert_eq!(r.error(), Some(&injected));
}

#[test]
fn single_property_object() {
    let mut r = Reader::new(br#"{"propertyName":"propertyValue"}"#);
    let mut seen = Vec::new();
    let mut obj = r.object().unwrap();
    while let Some((name, r)) = obj.next() {
        let value = r.string().unwrap();
        seen.push((String::from(name), value.into_owned()));
    }
    assert_eq!(
        seen,
        vec![("propertyName".into(), "propertyValue".into())]
    );
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn object_name_tracks_current_property() {
    let mut r = Reader::new(br#"{"ab": 1}"#);
    let mut obj = r.object().unwrap();
    assert_eq!(obj.name(), None);
    let (name, r) = obj.next().unwrap();
    assert_eq!(name, "ab");
    assert_eq!(r.int(), Ok(1));
    assert_eq!(obj.name(), Some("ab"));
    assert!(obj.next().is_none());
    assert_eq!(obj.name(), None);
}

#[test]
fn unread_values_are_skipped() {
    let input = br#"{"skip": {"deep": [1, {"x": [[], {}]}, "s"]}, "keep": true, "also": [null]}"#;
    let mut r = Reader::new(input);
    let mut keep = None;
    let mut obj = r.object().unwrap();
    while let Some((name, r)) = obj.next() {
        if name == "keep" {
            keep = Some(r.bool().unwrap());
        }
    }
    assert_eq!(keep, Some(true));
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn required_properties() {
    let mut r = Reader::new(br#"{"a":1,"c":3}"#);
    let mut obj = r
        .object()
        .unwrap()
        .with_required_properties(&["a", "b", "c"]);
    while let Some((_, r)) = obj.next() {
        r.int().unwrap();
    }
    assert_eq!(
        r.error(),
        Some(&Error::RequiredProperty(RequiredPropertyError {
            name: "b".into(),
            offset: 12,
        }))
    );
}

#[test]
fn required_properties_satisfied() {
    let mut r = Reader::new(br#"{"b":2,"a":1}"#);
    let mut obj = r.object().unwrap().with_required_properties(&["a", "b"]);
    while obj.next().is_some() {}
    assert_eq!(r.error(), None);
}

#[test]
fn required_properties_not_checked_after_failure() {
    let mut r = Reader::new(br#"{"a": x}"#);
    let mut obj = r.object().unwrap().with_required_properties(&["a", "b"]);
    while let Some((_, r)) = obj.next() {
        let _ = r.int();
    }
    assert_eq!(
        syntax_kind(r.error().unwrap()),
        SyntaxErrorKind::InvalidIdentifier
    );
}

#[rstest]
#[case(b"[1 2]", SyntaxErrorKind::ExpectedCommaOrEnd)]
#[case(b"[1,", SyntaxErrorKind::UnexpectedEndOfInput)]
#[case(b"{1:2}", SyntaxErrorKind::ExpectedPropertyName)]
#[case(b"{\"a\" 2}", SyntaxErrorKind::ExpectedColon)]
#[case(b"{\"a\":1,}", SyntaxErrorKind::ExpectedPropertyName)]
fn malformed_containers(#[case] input: &[u8], #[case] kind: SyntaxErrorKind) {
    let mut r = Reader::new(input);
    let _ = r.skip_value();
    assert_eq!(syntax_kind(r.error().unwrap()), kind);
}

#[test]
fn malformed_element_stops_iteration() {
    let mut r = Reader::new(b"[1 2]");
    let mut count = 0;
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        r.int().unwrap();
        count += 1;
    }
    assert_eq!(count, 1);
    assert_eq!(
        syntax_kind(r.error().unwrap()),
        SyntaxErrorKind::ExpectedCommaOrEnd
    );
}

#[test]
fn skip_value_consumes_exactly_one_value() {
    let mut r = Reader::new(br#"[{"a": [1, 2, {"b": null}]}, "next"]"#);
    let mut arr = r.array().unwrap();
    arr.next().unwrap().skip_value().unwrap();
    assert_eq!(arr.next().unwrap().string().unwrap(), "next");
    assert!(arr.next().is_none());
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn skip_value_handles_deep_nesting() {
    let depth = 100_000;
    let mut input = Vec::new();
    input.resize(depth, b'[');
    input.resize(depth * 2, b']');
    let mut r = Reader::new(&input);
    assert_eq!(r.skip_value(), Ok(()));
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn try_null_leaves_other_values_in_place() {
    let mut r = Reader::new(b"[1, 2, 3]");
    let mut count = 0;
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        assert_eq!(r.try_null(), Ok(false));
        count += 1;
    }
    assert_eq!(count, 3);
    assert_eq!(r.error(), None);
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn try_null_then_read() {
    let mut r = Reader::new(b"[1, null, 3]");
    let mut values = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        if r.try_null().unwrap() {
            values.push(None);
        } else {
            values.push(Some(r.int().unwrap()));
        }
    }
    assert_eq!(values, [Some(1), None, Some(3)]);
    assert_eq!(
        crate::from_slice::<Vec<Option<i64>>>(b"[null, 2, null]"),
        Ok(vec![None, Some(2), None])
    );
}

#[test]
fn any_reports_kinds() {
    let mut r = Reader::new(br#"[null, true, 1.5, "s", [], {}]"#);
    let mut kinds = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        kinds.push(r.any().unwrap().kind());
    }
    assert_eq!(
        kinds,
        [
            ValueKind::Null,
            ValueKind::Bool,
            ValueKind::Number,
            ValueKind::String,
            ValueKind::Array,
            ValueKind::Object
        ]
    );
    assert_eq!(r.error(), None);
}

#[test]
fn whitespace_does_not_change_results() {
    fn read(input: &[u8]) -> (Vec<i64>, Option<Error>) {
        let mut r = Reader::new(input);
        let mut out = Vec::new();
        if let Ok(mut obj) = r.object() {
            while let Some((_, r)) = obj.next() {
                if let Ok(mut arr) = r.array() {
                    while let Some(r) = arr.next() {
                        out.extend(r.int().ok());
                    }
                }
            }
        }
        let _ = r.require_eof();
        (out, r.error().cloned())
    }
    let compact = read(br#"{"a":[1,2],"b":[3]}"#);
    let spaced = read(b" {\n\t\"a\" : [ 1 , 2 ] ,\r\n \"b\":[3 ] } ");
    assert_eq!(compact, (vec![1, 2, 3], None));
    assert_eq!(compact, spaced);
}

#[test]
fn position_tracks_last_token() {
    let mut r = Reader::new(b"[10, 20]");
    let mut arr = r.array().unwrap();
    arr.next().unwrap().int().unwrap();
    let r = arr.next().unwrap();
    r.int().unwrap();
    assert_eq!(r.position(), 5);
}

#[test]
fn any_skips_unvisited_containers() {
    let mut r = Reader::new(br#"[null, true, 1, "s", [1, [2]], {"a": {"b": 1}}, 5]"#);
    let mut kinds = Vec::new();
    let mut arr = r.array().unwrap();
    while let Some(r) = arr.next() {
        kinds.push(r.any().unwrap().kind());
    }
    assert_eq!(
        kinds,
        [
            ValueKind::Null,
            ValueKind::Bool,
            ValueKind::Number,
            ValueKind::String,
            ValueKind::Array,
            ValueKind::Object,
            ValueKind::Number
        ]
    );
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn partly_read_containers_are_finished() {
    let mut r = Reader::new(br#"[[1, 2, 3], {"a": 1, "b": [4]}, [[5], 6], "tail"]"#);
    let mut seen = Vec::new();
    let mut arr = r.array().unwrap();
    let mut index = 0;
    while let Some(r) = arr.next() {
        match index {
            0 => {
                let mut inner = r.array().unwrap();
                seen.push(inner.next().unwrap().int().unwrap().to_string());
            }
            1 => {
                let mut inner = r.object().unwrap();
                let (name, _) = inner.next().unwrap();
                seen.push(name.to_string());
            }
            2 => {
                let mut inner = r.array().unwrap();
                let deeper = inner.next().unwrap().array().unwrap();
                assert!(deeper.is_defined());
            }
            _ => seen.push(r.string().unwrap().into_owned()),
        }
        index += 1;
    }
    assert_eq!(index, 4);
    assert_eq!(seen, ["1", "a", "tail"]);
    assert_eq!(r.require_eof(), Ok(()));
}

#[test]
fn malformed_input_in_abandoned_container_is_reported() {
    let mut r = Reader::new(b"[[1 2], 3]");
    let mut arr = r.array().unwrap();
    let nested = arr.next().unwrap().array().unwrap();
    drop(nested);
    assert!(arr.next().is_none());
    let err = r.error().unwrap();
    assert_eq!(syntax_kind(err), SyntaxErrorKind::ExpectedCommaOrEnd);
    assert_eq!(err.offset(), Some(4));
}

#[rstest]
#[case(b"[1, [2]] ", None)]
#[case(b"{\"a\": [1]} x", Some(11))]
fn require_eof_finishes_open_containers(#[case] input: &[u8], #[case] trailing: Option<usize>) {
    let mut r = Reader::new(input);
    let kind = r.any().unwrap().kind();
    assert!(matches!(kind, ValueKind::Array | ValueKind::Object));
    let result = r.require_eof();
    match trailing {
        None => assert_eq!(result, Ok(())),
        Some(offset) => {
            let err = result.unwrap_err();
            assert_eq!(syntax_kind(&err), SyntaxErrorKind::DataAfterEnd);
            assert_eq!(err.offset(), Some(offset));
        }
    }
}
