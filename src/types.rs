use core::fmt;

/// SEN5x sensor data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// Mass Concentration PM1.0 [μg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [μg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10_0: f32,
    /// Compensated Ambient Humidity [%RH]
    pub humidity: f32,
    /// Compensated Ambient Temperature [°C]
    pub temperature: f32,
    /// VOC Index
    pub voc_index: f32,
    /// NOx Index
    pub nox_index: f32,
}

impl Measurement {
    pub fn get(&self, field: Field) -> f32 {
        match field {
            Field::Pm1_0 => self.pm1_0,
            Field::Pm2_5 => self.pm2_5,
            Field::Pm4_0 => self.pm4_0,
            Field::Pm10_0 => self.pm10_0,
            Field::Humidity => self.humidity,
            Field::Temperature => self.temperature,
            Field::VocIndex => self.voc_index,
            Field::NoxIndex => self.nox_index,
        }
    }

    /// Display text for one field, e.g. `"12.3"` or `"100"` for the indices.
    pub fn formatted(&self, field: Field) -> String {
        let value = self.get(field);
        if field.is_index() {
            format!("{}", value as i32)
        } else {
            format!("{value:.1}")
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PM2.5={:.1} T={:.1} RH={:.1} VOC={:.0} NOx={:.0}",
            self.pm2_5, self.temperature, self.humidity, self.voc_index, self.nox_index
        )
    }
}

/// Measured quantities, in the order the sensor transmits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pm1_0,
    Pm2_5,
    Pm4_0,
    Pm10_0,
    Humidity,
    Temperature,
    VocIndex,
    NoxIndex,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Pm1_0,
        Field::Pm2_5,
        Field::Pm4_0,
        Field::Pm10_0,
        Field::Humidity,
        Field::Temperature,
        Field::VocIndex,
        Field::NoxIndex,
    ];

    /// Position of the field's word in the ReadMeasuredValues response.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::Pm1_0 => "PM 1.0",
            Field::Pm2_5 => "PM 2.5",
            Field::Pm4_0 => "PM 4.0",
            Field::Pm10_0 => "PM 10",
            Field::Humidity => "Humidity",
            Field::Temperature => "Temp",
            Field::VocIndex => "VOC",
            Field::NoxIndex => "NOx",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Field::Pm1_0 | Field::Pm2_5 | Field::Pm4_0 | Field::Pm10_0 => "ug/m3",
            Field::Humidity => "%RH",
            Field::Temperature => "°C",
            Field::VocIndex | Field::NoxIndex => "index",
        }
    }

    pub const fn is_index(self) -> bool {
        matches!(self, Field::VocIndex | Field::NoxIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_wire_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn formatting() {
        let m = Measurement {
            pm2_5: 12.34,
            temperature: -0.5,
            voc_index: 100.9,
            ..Default::default()
        };
        assert_eq!(m.formatted(Field::Pm2_5), "12.3");
        assert_eq!(m.formatted(Field::Temperature), "-0.5");
        assert_eq!(m.formatted(Field::VocIndex), "100");
        assert_eq!(
            m.to_string(),
            "PM2.5=12.3 T=-0.5 RH=0.0 VOC=101 NOx=0"
        );
    }
}
