//! Measurement type classification.

/// The kind of quantity a measurement value holds.
///
/// The data service names its sensor channels in German
/// (`lufttemperatur`, `windrichtung_avg`, ...). [`MeasurementType::from_name`]
/// maps those names onto this closed set.
///
/// # Examples
///
/// ```
/// use weather_observed::domain::MeasurementType;
///
/// assert_eq!(
///     MeasurementType::from_name("Lufttemperatur_AVG"),
///     Some(MeasurementType::TemperatureAverage)
/// );
/// assert_eq!(MeasurementType::from_name("feinstaub"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementType {
    Temperature,
    TemperatureAverage,
    UvIndex,
    UvIndexAverage,
    Precipitation,
    PrecipitationAverage,
    Humidity,
    HumidityAverage,
    AirPressure,
    AirPressureAverage,
    WindSpeed,
    WindSpeedAverage,
    WindDirection,
    WindDirectionAverage,
    GlobalRadiation,
    WaterOnSurface,

    Sunrise,
    Sunset,

    WaterPlayground,
    SwimmingSignal,
}

/// Source channel names and the type they classify as.
///
/// Sunrise and sunset have no channel name; they are only ever assigned
/// from their slot in the measurement set.
const SOURCE_NAMES: &[(&str, MeasurementType)] = &[
    ("lufttemperatur", MeasurementType::Temperature),
    ("lufttemperatur_avg", MeasurementType::TemperatureAverage),
    ("uv_index", MeasurementType::UvIndex),
    ("uv_index_avg", MeasurementType::UvIndexAverage),
    ("niederschlagsintensitaet", MeasurementType::Precipitation),
    (
        "niederschlagsintensitaet_avg",
        MeasurementType::PrecipitationAverage,
    ),
    ("relative_luftfeuchte", MeasurementType::Humidity),
    ("relative_luftfeuchte_avg", MeasurementType::HumidityAverage),
    ("realtiver_luftdruck", MeasurementType::AirPressure),
    ("realtiver_luftdruck_avg", MeasurementType::AirPressureAverage),
    ("windgeschwindigkeit_kmh", MeasurementType::WindSpeed),
    (
        "windgeschwindigkeit_kmh_avg",
        MeasurementType::WindSpeedAverage,
    ),
    ("windrichtung", MeasurementType::WindDirection),
    ("windrichtung_avg", MeasurementType::WindDirectionAverage),
    ("globalstrahlung", MeasurementType::GlobalRadiation),
    (
        "wasserfilmhoehe_auf_oberflaeche_avg",
        MeasurementType::WaterOnSurface,
    ),
    ("wasserspiel", MeasurementType::WaterPlayground),
    ("wasserspielplatz", MeasurementType::WaterPlayground),
    ("badeampel", MeasurementType::SwimmingSignal),
];

impl MeasurementType {
    /// Every measurement type, in declaration order.
    pub const ALL: [MeasurementType; 20] = [
        MeasurementType::Temperature,
        MeasurementType::TemperatureAverage,
        MeasurementType::UvIndex,
        MeasurementType::UvIndexAverage,
        MeasurementType::Precipitation,
        MeasurementType::PrecipitationAverage,
        MeasurementType::Humidity,
        MeasurementType::HumidityAverage,
        MeasurementType::AirPressure,
        MeasurementType::AirPressureAverage,
        MeasurementType::WindSpeed,
        MeasurementType::WindSpeedAverage,
        MeasurementType::WindDirection,
        MeasurementType::WindDirectionAverage,
        MeasurementType::GlobalRadiation,
        MeasurementType::WaterOnSurface,
        MeasurementType::Sunrise,
        MeasurementType::Sunset,
        MeasurementType::WaterPlayground,
        MeasurementType::SwimmingSignal,
    ];

    /// Classify a source channel name.
    ///
    /// Matching is exact after lowercasing; there is no fuzzy or prefix
    /// matching. Unknown names return `None`, which is an ordinary outcome
    /// for channels this crate does not model.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        SOURCE_NAMES
            .iter()
            .find(|(source, _)| *source == name)
            .map(|(_, kind)| *kind)
    }

    /// Whether this is an averaged variant of a measurement.
    pub fn is_average(&self) -> bool {
        matches!(
            self,
            MeasurementType::TemperatureAverage
                | MeasurementType::UvIndexAverage
                | MeasurementType::PrecipitationAverage
                | MeasurementType::HumidityAverage
                | MeasurementType::AirPressureAverage
                | MeasurementType::WindSpeedAverage
                | MeasurementType::WindDirectionAverage
                | MeasurementType::WaterOnSurface
        )
    }

    /// Whether this is a sunrise or sunset time.
    pub fn is_sun_cycle(&self) -> bool {
        matches!(self, MeasurementType::Sunrise | MeasurementType::Sunset)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy picking a table entry and a random casing of its name.
    fn recased_source_name() -> impl Strategy<Value = (String, MeasurementType)> {
        (0..SOURCE_NAMES.len(), any::<u64>()).prop_map(|(idx, mask)| {
            let (name, kind) = SOURCE_NAMES[idx];
            let recased = name
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if (mask >> (i % 64)) & 1 == 1 {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect();
            (recased, kind)
        })
    }

    proptest! {
        /// Any casing of a table name classifies like the name itself
        #[test]
        fn classification_ignores_case((name, kind) in recased_source_name()) {
            prop_assert_eq!(MeasurementType::from_name(&name), Some(kind));
        }

        /// Names outside the table are unclassified
        #[test]
        fn unknown_names_are_unclassified(name in "[a-z_]{0,40}") {
            let known = SOURCE_NAMES.iter().any(|(source, _)| *source == name);
            prop_assume!(!known);
            prop_assert_eq!(MeasurementType::from_name(&name), None);
        }

        /// Classification never panics on arbitrary input
        #[test]
        fn arbitrary_input_is_total(name in ".*") {
            let _ = MeasurementType::from_name(&name);
        }
    }
}
