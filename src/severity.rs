//! Air quality banding of measured values, for colouring dashboard cards.
//!
//! Particulate bands follow the US EPA breakpoints where they exist,
//! temperature and humidity use indoor comfort ranges, and the VOC/NOx
//! indices use Sensirion's 1-500 scale.

use crate::types::{Field, Measurement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
}

const BANDS: [Severity; 4] = [
    Severity::Good,
    Severity::Moderate,
    Severity::UnhealthySensitive,
    Severity::Unhealthy,
];

/// First band whose upper limit is not exceeded.
fn upper_limits(value: f32, limits: [f32; 3]) -> Severity {
    limits
        .iter()
        .position(|&limit| value <= limit)
        .map_or(Severity::Unhealthy, |i| BANDS[i])
}

/// First band whose inclusive range contains the value.
fn comfort_ranges(value: f32, ranges: [(f32, f32); 3]) -> Severity {
    ranges
        .iter()
        .position(|&(lo, hi)| (lo..=hi).contains(&value))
        .map_or(Severity::Unhealthy, |i| BANDS[i])
}

impl Severity {
    pub fn classify(field: Field, value: f32) -> Severity {
        match field {
            Field::Pm1_0 => upper_limits(value, [12.0, 35.0, 55.0]),
            Field::Pm2_5 => upper_limits(value, [12.0, 35.4, 55.4]),
            Field::Pm4_0 => upper_limits(value, [25.0, 50.0, 75.0]),
            Field::Pm10_0 => upper_limits(value, [54.0, 154.0, 254.0]),
            Field::Temperature => {
                comfort_ranges(value, [(18.0, 24.0), (15.0, 28.0), (10.0, 32.0)])
            }
            Field::Humidity => comfort_ranges(value, [(30.0, 60.0), (20.0, 70.0), (10.0, 80.0)]),
            Field::VocIndex => upper_limits(value, [150.0, 250.0, 400.0]),
            Field::NoxIndex => upper_limits(value, [20.0, 150.0, 250.0]),
        }
    }

    /// Worst band across all fields of a measurement.
    pub fn overall(measurement: &Measurement) -> Severity {
        Field::ALL
            .iter()
            .map(|&field| Severity::classify(field, measurement.get(field)))
            .max()
            .unwrap_or(Severity::Good)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pm2_5_breakpoints() {
        assert_eq!(Severity::classify(Field::Pm2_5, 12.0), Severity::Good);
        assert_eq!(Severity::classify(Field::Pm2_5, 12.1), Severity::Moderate);
        assert_eq!(Severity::classify(Field::Pm2_5, 55.4), Severity::UnhealthySensitive);
        assert_eq!(Severity::classify(Field::Pm2_5, 80.0), Severity::Unhealthy);
    }

    #[test]
    fn temperature_is_banded_on_both_sides() {
        assert_eq!(Severity::classify(Field::Temperature, 21.0), Severity::Good);
        assert_eq!(Severity::classify(Field::Temperature, 16.0), Severity::Moderate);
        assert_eq!(Severity::classify(Field::Temperature, 30.0), Severity::UnhealthySensitive);
        assert_eq!(Severity::classify(Field::Temperature, -0.5), Severity::Unhealthy);
    }

    #[test]
    fn overall_takes_worst_field() {
        let m = Measurement {
            pm2_5: 5.0,
            humidity: 45.0,
            temperature: 21.0,
            voc_index: 100.0,
            nox_index: 300.0,
            ..Default::default()
        };
        assert_eq!(Severity::overall(&m), Severity::Unhealthy);
    }
}
