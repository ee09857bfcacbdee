//! Query decoder vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rockblock_core::{decode, decode_with, DecodeLimits, StructuredValue, WebhookError};

use vector_loader::load;

#[test]
fn decode_vectors() {
    let files = [
        "flat_sample.json",
        "empty.json",
        "only_separators.json",
        "nested_brackets.json",
        "dotted.json",
        "array_indices.json",
        "array_sparse.json",
        "array_append.json",
        "array_of_objects.json",
        "repeated_key.json",
        "shape_override.json",
        "escapes_and_plus.json",
        "skip_empty_segments.json",
        "value_with_equals.json",
        "empty_value.json",
        "bad_escape.json",
        "truncated_escape.json",
        "missing_separator.json",
        "unterminated_bracket.json",
        "empty_key.json",
        "empty_dotted_segment.json",
        "malformed_key.json",
        "invalid_utf8.json",
    ];

    for f in files {
        let v = load(f);
        let res = decode(v.payload.as_bytes());

        if let Some(err) = v.expect_error {
            let e = WebhookError::from(res.expect_err("expected error"));
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let tree = res.expect("expected ok tree");
        let ex = v.expect.expect("missing expect block");
        assert_eq!(tree.to_json(), ex, "vector={}", v.description);
    }
}

#[test]
fn decoding_is_idempotent() {
    let payload = b"imei=1&a[b][0]=x&a[b][1]=y&serial=1&serial=2";
    assert_eq!(decode(payload).unwrap(), decode(payload).unwrap());
}

#[test]
fn leaves_are_never_coerced() {
    let tree = decode(b"n=42&b=true").unwrap();
    assert_eq!(tree.get("n"), Some(&StructuredValue::from("42")));
    assert_eq!(tree.get("b"), Some(&StructuredValue::from("true")));
}

#[test]
fn array_shape_replaced_by_object_key() {
    let tree = decode(b"a[0]=x&a[k]=y").unwrap();
    assert_eq!(tree.to_json(), serde_json::json!({ "a": { "k": "y" } }));
}

#[test]
fn index_above_limit_becomes_object_key() {
    let limits = DecodeLimits {
        max_depth: 8,
        array_limit: 3,
    };
    let tree = decode_with(b"a[4]=x", &limits).unwrap();
    assert_eq!(tree.to_json(), serde_json::json!({ "a": { "4": "x" } }));
}

#[test]
fn depth_limit_is_enforced() {
    let limits = DecodeLimits {
        max_depth: 1,
        array_limit: 100,
    };
    assert!(decode_with(b"a[b]=1", &limits).is_ok());
    let err = decode_with(b"a[b][c]=1", &limits).unwrap_err();
    assert!(err.to_string().contains("deeper than 1"), "{err}");
}

#[test]
fn escape_offset_points_into_payload() {
    let err = decode(b"serial=1&imei=%ZZ").unwrap_err();
    assert_eq!(err.to_string(), "invalid percent-escape at byte 14");
}

#[test]
fn non_utf8_raw_bytes_are_rejected() {
    let err = decode(b"data=\xff").unwrap_err();
    assert_eq!(err, rockblock_core::error::DecodeError::InvalidUtf8);
}

#[test]
fn text_after_bracket_is_malformed_key() {
    let err = decode(b"a[b]c=1").unwrap_err();
    assert_eq!(
        err,
        rockblock_core::error::DecodeError::MalformedKey { key: "a[b]c".into() }
    );
}
