//! RockBLOCK message schema and the tree -> message mapper.
//!
//! Mapping is lenient about absence and strict about shape:
//! - absent numeric fields default to zero, absent strings to `""`;
//! - present fields that fail to coerce are collected, never dropped;
//! - unknown keys are ignored.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FieldError, MappingError};
use crate::query::StructuredValue;

pub const FIELD_IMEI: &str = "imei";
pub const FIELD_SERIAL: &str = "serial";
pub const FIELD_MOMSN: &str = "momsn";
pub const FIELD_TRANSMIT_TIME: &str = "transmit_time";
pub const FIELD_LATITUDE: &str = "iridium_latitude";
pub const FIELD_LONGITUDE: &str = "iridium_longitude";
pub const FIELD_CEP: &str = "iridium_cep";
pub const FIELD_DATA: &str = "data";

/// Pseudo-field reported when the tree root is not an object.
pub const FIELD_ROOT: &str = "$root";

/// One mobile-originated message as delivered by the provider callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Modem IMEI.
    pub imei: i64,
    /// Device serial number.
    pub serial: i32,
    /// Mobile-originated message sequence number.
    pub momsn: i32,
    /// UTC transmit time, as sent.
    pub transmit_time: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Position accuracy estimate (CEP) in km.
    pub accuracy_km: i64,
    /// Hex-encoded payload, as sent.
    pub data: String,
}

/// Accumulates field failures across one mapping pass.
struct FieldCollector<'a> {
    fields: &'a BTreeMap<String, StructuredValue>,
    errors: Vec<FieldError>,
}

impl<'a> FieldCollector<'a> {
    fn new(fields: &'a BTreeMap<String, StructuredValue>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, reason: String) {
        self.errors.push(FieldError {
            field: field.to_owned(),
            reason,
        });
    }

    fn scalar(&mut self, field: &str) -> Option<&'a str> {
        let fields = self.fields;
        let value = fields.get(field)?;
        match value.as_scalar() {
            Some(s) => Some(s),
            None => {
                self.fail(field, format!("expected a string value, found {}", value.kind()));
                None
            }
        }
    }

    fn integer<T>(&mut self, field: &str) -> T
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        let Some(raw) = self.scalar(field) else {
            return T::default();
        };
        match raw.parse::<T>() {
            Ok(v) => v,
            Err(e) => {
                self.fail(field, format!("expected a base-10 integer, got {raw:?} ({e})"));
                T::default()
            }
        }
    }

    fn float(&mut self, field: &str) -> f64 {
        let Some(raw) = self.scalar(field) else {
            return 0.0;
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            Ok(_) => {
                self.fail(field, format!("expected a finite decimal number, got {raw:?}"));
                0.0
            }
            Err(e) => {
                self.fail(field, format!("expected a decimal number, got {raw:?} ({e})"));
                0.0
            }
        }
    }

    fn text(&mut self, field: &str) -> String {
        self.scalar(field).unwrap_or_default().to_owned()
    }

    fn finish(self, message: Message) -> Result<Message, MappingError> {
        if self.errors.is_empty() {
            Ok(message)
        } else {
            Err(MappingError {
                errors: self.errors,
            })
        }
    }
}

/// Coerce a decoded tree into a `Message`, reporting every bad field at once.
pub fn map_message(value: &StructuredValue) -> Result<Message, MappingError> {
    let Some(fields) = value.as_object() else {
        return Err(MappingError {
            errors: vec![FieldError {
                field: FIELD_ROOT.to_owned(),
                reason: format!("expected an object, found {}", value.kind()),
            }],
        });
    };

    let mut c = FieldCollector::new(fields);
    let message = Message {
        imei: c.integer(FIELD_IMEI),
        serial: c.integer(FIELD_SERIAL),
        momsn: c.integer(FIELD_MOMSN),
        transmit_time: c.text(FIELD_TRANSMIT_TIME),
        latitude: c.float(FIELD_LATITUDE),
        longitude: c.float(FIELD_LONGITUDE),
        accuracy_km: c.integer(FIELD_CEP),
        data: c.text(FIELD_DATA),
    };
    c.finish(message)
}
