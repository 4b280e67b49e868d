use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::ForecastError;

/// Unit system requested from (or reported by) the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Units {
    Us,
    Si,
    Ca,
    Uk,
    Auto,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Us => "us",
            Units::Si => "si",
            Units::Ca => "ca",
            Units::Uk => "uk",
            Units::Auto => "auto",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Us, Units::Si, Units::Ca, Units::Uk, Units::Auto]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = ForecastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "us" => Ok(Units::Us),
            "si" => Ok(Units::Si),
            "ca" => Ok(Units::Ca),
            // The API reports the revised British mode as "uk2".
            "uk" | "uk2" => Ok(Units::Uk),
            "auto" => Ok(Units::Auto),
            _ => Err(ForecastError::Configuration(format!(
                "Unknown units '{value}'. Supported units: us, si, ca, uk, auto."
            ))),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Units::try_from(value.as_str())
    }
}

/// Physical quantities whose unit depends on the units mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    NearestStormDistance,
    PrecipIntensity,
    PrecipAccumulation,
    Temperature,
    WindSpeed,
    Pressure,
    Visibility,
    Ozone,
}

impl Quantity {
    pub const fn all() -> &'static [Quantity] {
        &[
            Quantity::NearestStormDistance,
            Quantity::PrecipIntensity,
            Quantity::PrecipAccumulation,
            Quantity::Temperature,
            Quantity::WindSpeed,
            Quantity::Pressure,
            Quantity::Visibility,
            Quantity::Ozone,
        ]
    }
}

/// Unit symbol for `quantity` under `units`.
///
/// `Auto` has no fixed symbols; the response flags always report the mode
/// that was actually applied.
pub fn unit_symbol(quantity: Quantity, units: Units) -> Option<&'static str> {
    use Quantity::*;
    use Units::*;

    let symbol = match (quantity, units) {
        (_, Auto) => return None,

        (NearestStormDistance, Us) => "mi",
        (NearestStormDistance, _) => "km",

        (PrecipIntensity, Us) => "in/h",
        (PrecipIntensity, _) => "mm/h",

        (PrecipAccumulation, Us) => "in",
        (PrecipAccumulation, _) => "cm",

        (Temperature, Us) => "°F",
        (Temperature, _) => "°C",

        (WindSpeed, Us) => "mi/h",
        (WindSpeed, Si) => "m/s",
        (WindSpeed, Ca) => "km/h",
        (WindSpeed, Uk) => "mi/h",

        (Pressure, Us) => "hPa",
        (Pressure, _) => "mbar",

        (Visibility, Us) => "mi",
        (Visibility, _) => "km",

        (Ozone, _) => "DU",
    };

    Some(symbol)
}
