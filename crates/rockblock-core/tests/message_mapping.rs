//! Tree -> Message mapping tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rockblock_core::error::ClientCode;
use rockblock_core::{decode, map_message, Message, StructuredValue, WebhookError};

fn map(payload: &str) -> Result<Message, WebhookError> {
    let tree = decode(payload.as_bytes())?;
    Ok(map_message(&tree)?)
}

#[test]
fn flat_callback_maps_every_field() {
    let msg = map(
        "imei=300234010753370&serial=12345&momsn=1&transmit_time=2023-01-01T00:00:00Z\
         &iridium_latitude=52.1&iridium_longitude=4.3&iridium_cep=4&data=48656c6c6f",
    )
    .unwrap();

    assert_eq!(
        msg,
        Message {
            imei: 300234010753370,
            serial: 12345,
            momsn: 1,
            transmit_time: "2023-01-01T00:00:00Z".into(),
            latitude: 52.1,
            longitude: 4.3,
            accuracy_km: 4,
            data: "48656c6c6f".into(),
        }
    );
}

#[test]
fn empty_payload_maps_to_defaults() {
    assert_eq!(map("").unwrap(), Message::default());
}

#[test]
fn escaped_transmit_time_is_passed_through() {
    let msg = map("transmit_time=23-01-01+10%3A15%3A00").unwrap();
    assert_eq!(msg.transmit_time, "23-01-01 10:15:00");
}

#[test]
fn unknown_fields_are_ignored() {
    let msg = map("imei=1&foo=bar&device[name]=x").unwrap();
    assert_eq!(msg.imei, 1);
}

#[test]
fn repeated_key_last_value_wins() {
    assert_eq!(map("serial=1&serial=2").unwrap().serial, 2);
}

#[test]
fn every_bad_field_is_reported() {
    let err = map("imei=abc&serial=12345&momsn=99999999999&iridium_latitude=north&iridium_cep=")
        .unwrap_err();
    assert_eq!(err.client_code(), ClientCode::MappingFailed);

    let WebhookError::Mapping(m) = err else {
        panic!("expected mapping error");
    };
    assert_eq!(m.fields(), vec!["imei", "momsn", "iridium_latitude", "iridium_cep"]);
}

#[test]
fn mapping_error_message_lists_fields() {
    let err = map("imei=abc&serial=x").unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("invalid fields: imei: "), "{text}");
    assert!(text.contains("; serial: "), "{text}");
}

#[test]
fn width_is_enforced_per_field() {
    // fits i64 but not i32
    let err = map("imei=3000000000&serial=3000000000").unwrap_err();
    let WebhookError::Mapping(m) = err else {
        panic!("expected mapping error");
    };
    assert_eq!(m.fields(), vec!["serial"]);
}

#[test]
fn non_finite_floats_are_rejected() {
    let err = map("iridium_latitude=NaN&iridium_longitude=inf").unwrap_err();
    let WebhookError::Mapping(m) = err else {
        panic!("expected mapping error");
    };
    assert_eq!(m.fields(), vec!["iridium_latitude", "iridium_longitude"]);
}

#[test]
fn negative_coordinates() {
    let msg = map("iridium_latitude=-33.9&iridium_longitude=-151.2").unwrap();
    assert_eq!(msg.latitude, -33.9);
    assert_eq!(msg.longitude, -151.2);
}

#[test]
fn nested_value_in_scalar_field_is_an_error() {
    let err = map("imei[0]=1&data[x]=ab").unwrap_err();
    let WebhookError::Mapping(m) = err else {
        panic!("expected mapping error");
    };
    assert_eq!(m.fields(), vec!["imei", "data"]);
    assert!(m.errors[0].reason.contains("found array"));
    assert!(m.errors[1].reason.contains("found object"));
}

#[test]
fn non_object_root_is_reported() {
    let err = map_message(&StructuredValue::from("x")).unwrap_err();
    assert_eq!(err.fields(), vec!["$root"]);
}

#[test]
fn message_serializes_camel_case() {
    let msg = Message {
        transmit_time: "t".into(),
        accuracy_km: 3,
        ..Message::default()
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["transmitTime"], "t");
    assert_eq!(json["accuracyKm"], 3);
}
