//! The measurement set of a sensor station.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::trace;

use super::measurement::MeasurementType;
use super::value::MeasurementValue;

/// One of the ten named measurement slots of a station record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    SwimmingSignal,
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    Precipitation,
    AirPressure,
    WaterPlayground,
    Sunrise,
    Sunset,
}

impl Slot {
    /// Every slot, in the order values are listed.
    pub const ALL: [Slot; 10] = [
        Slot::SwimmingSignal,
        Slot::Temperature,
        Slot::Humidity,
        Slot::WindSpeed,
        Slot::WindDirection,
        Slot::Precipitation,
        Slot::AirPressure,
        Slot::WaterPlayground,
        Slot::Sunrise,
        Slot::Sunset,
    ];

    /// Key of the slot in the `values` object.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::SwimmingSignal => "badeampel",
            Slot::Temperature => "lufttemperatur",
            Slot::Humidity => "relative_luftfeuchte",
            Slot::WindSpeed => "windgeschwindigkeit_kmh",
            Slot::WindDirection => "windrichtung",
            Slot::Precipitation => "niederschlagsintensitaet",
            Slot::AirPressure => "realtiver_luftdruck",
            Slot::WaterPlayground => "wasserspiel",
            Slot::Sunrise => "sonnenaufgang",
            Slot::Sunset => "sonnenuntergang",
        }
    }

    /// Kind assigned to every value decoded from this slot.
    pub fn kind(&self) -> MeasurementType {
        match self {
            Slot::SwimmingSignal => MeasurementType::SwimmingSignal,
            Slot::Temperature => MeasurementType::Temperature,
            Slot::Humidity => MeasurementType::Humidity,
            Slot::WindSpeed => MeasurementType::WindSpeed,
            Slot::WindDirection => MeasurementType::WindDirection,
            Slot::Precipitation => MeasurementType::Precipitation,
            Slot::AirPressure => MeasurementType::AirPressure,
            Slot::WaterPlayground => MeasurementType::WaterPlayground,
            Slot::Sunrise => MeasurementType::Sunrise,
            Slot::Sunset => MeasurementType::Sunset,
        }
    }

    /// Whether the slot holds sunrise or sunset.
    pub fn is_sun_cycle(&self) -> bool {
        matches!(self, Slot::Sunrise | Slot::Sunset)
    }
}

/// Up to ten readings of a station, one per [`Slot`].
///
/// Each slot is decoded on its own. A slot that is missing, or whose
/// payload is not an object, is `None`; it never fails the whole set.
/// The kind of a decoded value always comes from its slot, overriding
/// whatever `type` the payload carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherValues {
    pub swimming_signal: Option<MeasurementValue>,
    pub temperature: Option<MeasurementValue>,
    pub humidity: Option<MeasurementValue>,
    pub wind_speed: Option<MeasurementValue>,
    pub wind_direction: Option<MeasurementValue>,
    pub precipitation: Option<MeasurementValue>,
    pub air_pressure: Option<MeasurementValue>,
    pub water_playground: Option<MeasurementValue>,
    pub sunrise: Option<MeasurementValue>,
    pub sunset: Option<MeasurementValue>,
}

impl WeatherValues {
    /// Decode the set from the `values` object of a station record.
    pub fn from_map(raw: &Map<String, Value>) -> Self {
        let mut values = Self::default();
        for slot in Slot::ALL {
            let decoded = raw.get(slot.key()).and_then(|payload| {
                MeasurementValue::deserialize(payload)
                    .inspect_err(|e| trace!(slot = slot.key(), error = %e, "dropping slot"))
                    .ok()
            });
            *values.slot_mut(slot) = decoded.map(|value| value.with_kind(slot.kind()));
        }
        values
    }

    /// The value in a slot.
    pub fn get(&self, slot: Slot) -> Option<&MeasurementValue> {
        match slot {
            Slot::SwimmingSignal => self.swimming_signal.as_ref(),
            Slot::Temperature => self.temperature.as_ref(),
            Slot::Humidity => self.humidity.as_ref(),
            Slot::WindSpeed => self.wind_speed.as_ref(),
            Slot::WindDirection => self.wind_direction.as_ref(),
            Slot::Precipitation => self.precipitation.as_ref(),
            Slot::AirPressure => self.air_pressure.as_ref(),
            Slot::WaterPlayground => self.water_playground.as_ref(),
            Slot::Sunrise => self.sunrise.as_ref(),
            Slot::Sunset => self.sunset.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<MeasurementValue> {
        match slot {
            Slot::SwimmingSignal => &mut self.swimming_signal,
            Slot::Temperature => &mut self.temperature,
            Slot::Humidity => &mut self.humidity,
            Slot::WindSpeed => &mut self.wind_speed,
            Slot::WindDirection => &mut self.wind_direction,
            Slot::Precipitation => &mut self.precipitation,
            Slot::AirPressure => &mut self.air_pressure,
            Slot::WaterPlayground => &mut self.water_playground,
            Slot::Sunrise => &mut self.sunrise,
            Slot::Sunset => &mut self.sunset,
        }
    }

    /// All ten slots in order, present or not.
    pub fn all_values(&self) -> [Option<&MeasurementValue>; 10] {
        Slot::ALL.map(|slot| self.get(slot))
    }

    /// Present values with their slot, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &MeasurementValue)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|value| (slot, value)))
    }

    /// Present values of every slot except sunrise and sunset.
    pub fn primary_values(&self) -> Vec<&MeasurementValue> {
        self.iter()
            .filter(|(slot, _)| !slot.is_sun_cycle())
            .map(|(_, value)| value)
            .collect()
    }

    /// Present sunrise and sunset values.
    pub fn sun_cycle_values(&self) -> Vec<&MeasurementValue> {
        self.iter()
            .filter(|(slot, _)| slot.is_sun_cycle())
            .map(|(_, value)| value)
            .collect()
    }
}

impl<'de> Deserialize<'de> for WeatherValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&raw))
    }
}
