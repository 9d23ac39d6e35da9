//! Tests for PropertiesCodec

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use shaper_content::{FailureKind, FormatCodec, PropertiesCodec};

fn decode(source: &str) -> serde_json::Value {
    PropertiesCodec::new().decode(source).unwrap()
}

#[test]
fn test_decode_keeps_key_order() {
    let value = decode("port=8080\nhost=localhost\nAdminUser=root");
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["port", "host", "AdminUser"]);
    assert_eq!(value["port"], json!("8080"));
}

#[rstest]
#[case("key=value", "value")]
#[case("key = value  ", "value")]
#[case("key: value", "value")]
#[case("key=a=b", "a=b")]
#[case("key=", "")]
#[case("key=50% off", "50% off")]
#[case("key=%(other)s", "%(other)s")]
fn test_decode_single_value(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(decode(source)["key"], json!(expected));
}

#[test]
fn test_decode_skips_comments() {
    let value = decode("# header\n; note\nkey=value\n");
    assert_eq!(value, json!({"key": "value"}));
}

#[test]
fn test_decode_continuation_lines() {
    let value = decode("motd=first\n  second\n\n  third\nnext=1\n");
    assert_eq!(value["motd"], json!("first\nsecond\n\nthird"));
    assert_eq!(value["next"], json!("1"));
}

#[test]
fn test_decode_empty_file_is_empty_mapping() {
    assert_eq!(decode(""), json!({}));
}

#[rstest]
#[case::duplicate("a=1\na=2")]
#[case::no_delimiter("just some words")]
#[case::missing_key("=value")]
#[case::section("[main]\na=1")]
fn test_decode_errors(#[case] source: &str) {
    let err = PropertiesCodec::new().decode(source).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
}

#[test]
fn test_encode_joins_lines_without_trailing_newline() {
    let out = PropertiesCodec::new()
        .encode(&json!({"port": "8080", "host": "localhost"}))
        .unwrap();
    assert_eq!(out, "port=8080\nhost=localhost");
}

#[test]
fn test_encode_indents_multiline_values() {
    let out = PropertiesCodec::new()
        .encode(&json!({"motd": "first\nsecond", "debug": true, "retries": 3, "unset": null}))
        .unwrap();
    insta::assert_snapshot!(out.replace('\n', "|"), @"motd=first|  second|debug=true|retries=3|unset=");
}

#[test]
fn test_encode_rejects_nested_values() {
    let err = PropertiesCodec::new()
        .encode(&json!({"nested": {"a": 1}}))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Serialize);
}

#[test]
fn test_round_trip_is_byte_exact() {
    let codec = PropertiesCodec::new();
    let source = "port=8080\nhost=localhost\nmotd=line one\n  line two\nrate=100%";
    let value = codec.decode(source).unwrap();
    assert_eq!(codec.encode(&value).unwrap(), source);
}

#[rstest]
#[case::hash("line one\n#not a comment")]
#[case::semicolon("line one\n; also kept")]
#[case::indented_hash("line one\n  # indented")]
fn test_multiline_value_with_comment_marker_survives(#[case] text: &str) {
    let codec = PropertiesCodec::new();
    let original = json!({"motd": text, "next": "1"});
    let encoded = codec.encode(&original).unwrap();
    let decoded = codec.decode(&encoded).unwrap();
    assert_eq!(decoded["motd"], json!(text.replace("\n  ", "\n")));
    assert_eq!(decoded["next"], json!("1"));
}

#[test]
fn test_percent_in_key_round_trips() {
    let codec = PropertiesCodec::new();
    let source = "rate%=5\n%(ref)s=x";
    let value = codec.decode(source).unwrap();
    assert_eq!(value, json!({"rate%": "5", "%(ref)s": "x"}));
    assert_eq!(codec.encode(&value).unwrap(), source);
}

mod round_trip {
    use proptest::prelude::*;
    use serde_json::{Map, Value};
    use shaper_content::{FormatCodec, PropertiesCodec};

    fn line() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9%()#;_-][a-zA-Z0-9%()#;. _-]{0,15}".prop_map(|s| s.trim_end().to_string())
    }

    fn value() -> impl Strategy<Value = String> {
        prop::collection::vec(line(), 0..3).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn prop_encode_then_decode_is_identity(
            entries in prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9_.%-]{0,8}", value(), 0..8)
        ) {
            let map: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            let original = Value::Object(map);

            let codec = PropertiesCodec::new();
            let encoded = codec.encode(&original).unwrap();
            prop_assert_eq!(codec.decode(&encoded).unwrap(), original);
        }
    }
}
