//! Conversion of raw measured value words to physical units.

use crate::types::{Field, Measurement};

/// Whether the word is read as a two's complement value, and its divisor.
const fn scaling(field: Field) -> (bool, f32) {
    match field {
        Field::Pm1_0 | Field::Pm2_5 | Field::Pm4_0 | Field::Pm10_0 => (false, 10.0),
        Field::Humidity => (true, 100.0),
        Field::Temperature => (true, 200.0),
        Field::VocIndex | Field::NoxIndex => (true, 10.0),
    }
}

/// Scale a single raw word for `field`.
pub fn decode_field(field: Field, raw: u16) -> f32 {
    let (signed, divisor) = scaling(field);
    let value = if signed {
        f32::from(raw as i16)
    } else {
        f32::from(raw)
    };
    value / divisor
}

/// Convert a full ReadMeasuredValues response.
pub fn decode_measurement(words: &[u16; 8]) -> Measurement {
    let value = |field: Field| decode_field(field, words[field.index()]);
    Measurement {
        pm1_0: value(Field::Pm1_0),
        pm2_5: value(Field::Pm2_5),
        pm4_0: value(Field::Pm4_0),
        pm10_0: value(Field::Pm10_0),
        humidity: value(Field::Humidity),
        temperature: value(Field::Temperature),
        voc_index: value(Field::VocIndex),
        nox_index: value(Field::NoxIndex),
    }
}
