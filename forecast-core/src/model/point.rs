use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::Value;

use super::{Node, localize};
use crate::{ForecastError, Result};

/// How the value of a [`Field`] is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    /// Epoch seconds. Time fields never carry an error companion.
    Time,
    Text,
}

macro_rules! field_type {
    (Number) => { Option<f64> };
    (Time) => { Option<i64> };
    (Text) => { Option<&str> };
}

macro_rules! read_field {
    ($node:expr, Number, $key:literal) => { $node.number($key) };
    ($node:expr, Time, $key:literal) => { $node.integer($key) };
    ($node:expr, Text, $key:literal) => { $node.text($key) };
}

macro_rules! data_point_fields {
    ($( $variant:ident($key:literal, $kind:ident) => $getter:ident, $has:ident; )*) => {
        /// Every field a data point can carry, with its JSON key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $( $variant, )*
        }

        impl Field {
            pub const fn all() -> &'static [Field] {
                &[ $( Field::$variant, )* ]
            }

            pub fn key(&self) -> &'static str {
                match self {
                    $( Field::$variant => $key, )*
                }
            }

            pub fn kind(&self) -> FieldKind {
                match self {
                    $( Field::$variant => FieldKind::$kind, )*
                }
            }
        }

        impl DataPoint {
            $(
                #[doc = concat!("`", $key, "`, if present.")]
                pub fn $getter(&self) -> field_type!($kind) {
                    read_field!(self.node, $kind, $key)
                }

                pub fn $has(&self) -> bool {
                    self.node.has($key)
                }
            )*
        }
    };
}

data_point_fields! {
    Time("time", Time) => time, has_time;
    Summary("summary", Text) => summary, has_summary;
    Icon("icon", Text) => icon, has_icon;
    SunriseTime("sunriseTime", Time) => sunrise_time, has_sunrise_time;
    SunsetTime("sunsetTime", Time) => sunset_time, has_sunset_time;
    MoonPhase("moonPhase", Number) => moon_phase, has_moon_phase;
    NearestStormDistance("nearestStormDistance", Number) => nearest_storm_distance, has_nearest_storm_distance;
    NearestStormBearing("nearestStormBearing", Number) => nearest_storm_bearing, has_nearest_storm_bearing;
    PrecipIntensity("precipIntensity", Number) => precip_intensity, has_precip_intensity;
    PrecipIntensityMax("precipIntensityMax", Number) => precip_intensity_max, has_precip_intensity_max;
    PrecipIntensityMaxTime("precipIntensityMaxTime", Time) => precip_intensity_max_time, has_precip_intensity_max_time;
    PrecipProbability("precipProbability", Number) => precip_probability, has_precip_probability;
    PrecipType("precipType", Text) => precip_type, has_precip_type;
    PrecipAccumulation("precipAccumulation", Number) => precip_accumulation, has_precip_accumulation;
    Temperature("temperature", Number) => temperature, has_temperature;
    TemperatureMin("temperatureMin", Number) => temperature_min, has_temperature_min;
    TemperatureMinTime("temperatureMinTime", Time) => temperature_min_time, has_temperature_min_time;
    TemperatureMax("temperatureMax", Number) => temperature_max, has_temperature_max;
    TemperatureMaxTime("temperatureMaxTime", Time) => temperature_max_time, has_temperature_max_time;
    ApparentTemperature("apparentTemperature", Number) => apparent_temperature, has_apparent_temperature;
    ApparentTemperatureMin("apparentTemperatureMin", Number) => apparent_temperature_min, has_apparent_temperature_min;
    ApparentTemperatureMinTime("apparentTemperatureMinTime", Time) => apparent_temperature_min_time, has_apparent_temperature_min_time;
    ApparentTemperatureMax("apparentTemperatureMax", Number) => apparent_temperature_max, has_apparent_temperature_max;
    ApparentTemperatureMaxTime("apparentTemperatureMaxTime", Time) => apparent_temperature_max_time, has_apparent_temperature_max_time;
    DewPoint("dewPoint", Number) => dew_point, has_dew_point;
    WindSpeed("windSpeed", Number) => wind_speed, has_wind_speed;
    WindBearing("windBearing", Number) => wind_bearing, has_wind_bearing;
    CloudCover("cloudCover", Number) => cloud_cover, has_cloud_cover;
    Humidity("humidity", Number) => humidity, has_humidity;
    Pressure("pressure", Number) => pressure, has_pressure;
    Visibility("visibility", Number) => visibility, has_visibility;
    Ozone("ozone", Number) => ozone, has_ozone;
}

impl Field {
    pub fn is_time(&self) -> bool {
        self.kind() == FieldKind::Time
    }

    /// Case-insensitive match on the JSON key, e.g. `"precipIntensity"`.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::all()
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(name))
    }
}

/// Conditions at a single instant.
#[derive(Debug, Clone)]
pub struct DataPoint {
    node: Node,
}

impl DataPoint {
    pub(crate) fn new(node: Node) -> Self {
        Self { node }
    }

    /// Raw JSON object behind this point.
    pub fn raw(&self) -> Option<&Value> {
        self.node.value()
    }

    /// Timezone of the enclosing response.
    pub fn timezone(&self) -> Option<&str> {
        self.node.timezone()
    }

    pub fn has(&self, field: Field) -> bool {
        self.node.has(field.key())
    }

    /// Raw value of `field` as it appears in the document.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.node.field(field.key())
    }

    /// Standard deviation reported next to `field` (`<key>Error`).
    pub fn error(&self, field: Field) -> Result<Option<f64>> {
        Ok(self.error_value(field)?.and_then(Value::as_f64))
    }

    fn error_value(&self, field: Field) -> Result<Option<&Value>> {
        if field.is_time() {
            return Err(ForecastError::Usage(format!(
                "Time fields have no associated error value: {}Error",
                field.key()
            )));
        }
        Ok(self.node.field(&format!("{}Error", field.key())))
    }

    /// Resolve a field or its error companion by name.
    ///
    /// Accepts a bare key such as `"humidity"` or an error name such as
    /// `"humidityError"`.
    pub fn lookup(&self, name: &str) -> Result<Option<&Value>> {
        if let Some(field) = Field::from_name(name) {
            return Ok(self.get(field));
        }

        let base = name
            .len()
            .checked_sub("Error".len())
            .filter(|&split| name.is_char_boundary(split))
            .map(|split| name.split_at(split))
            .filter(|(_, suffix)| suffix.eq_ignore_ascii_case("Error"))
            .map(|(base, _)| base);

        match base.and_then(Field::from_name) {
            Some(field) => self.error_value(field),
            None => Err(ForecastError::Usage(format!("No such field: {name}"))),
        }
    }

    pub fn icon_kind(&self) -> Option<Icon> {
        self.icon().and_then(Icon::from_code)
    }

    pub fn precip_kind(&self) -> Option<PrecipType> {
        self.precip_type().and_then(PrecipType::from_code)
    }

    /// `time` in the response timezone.
    pub fn local_time(&self) -> Option<DateTime<Tz>> {
        self.time().and_then(|ts| localize(ts, self.timezone()))
    }

    /// Any time field in the response timezone.
    pub fn local(&self, field: Field) -> Result<Option<DateTime<Tz>>> {
        if !field.is_time() {
            return Err(ForecastError::Usage(format!(
                "Not a time field: {}",
                field.key()
            )));
        }
        Ok(self
            .node
            .integer(field.key())
            .and_then(|ts| localize(ts, self.timezone())))
    }
}

/// Machine-readable summary icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ClearDay,
    ClearNight,
    Rain,
    Snow,
    Sleet,
    Wind,
    Fog,
    Cloudy,
    PartlyCloudyDay,
    PartlyCloudyNight,
}

impl Icon {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "clear-day" => Some(Self::ClearDay),
            "clear-night" => Some(Self::ClearNight),
            "rain" => Some(Self::Rain),
            "snow" => Some(Self::Snow),
            "sleet" => Some(Self::Sleet),
            "wind" => Some(Self::Wind),
            "fog" => Some(Self::Fog),
            "cloudy" => Some(Self::Cloudy),
            "partly-cloudy-day" => Some(Self::PartlyCloudyDay),
            "partly-cloudy-night" => Some(Self::PartlyCloudyNight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Sleet => "sleet",
            Self::Wind => "wind",
            Self::Fog => "fog",
            Self::Cloudy => "cloudy",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipType {
    Rain,
    Snow,
    Sleet,
}

impl PrecipType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "rain" => Some(Self::Rain),
            "snow" => Some(Self::Snow),
            "sleet" => Some(Self::Sleet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(value: Value) -> DataPoint {
        DataPoint::new(Node::root(value))
    }

    #[test]
    fn every_field_has_unique_key_and_resolves_by_name() {
        for field in Field::all() {
            assert_eq!(Field::from_name(field.key()), Some(*field));
            assert_eq!(Field::from_name(&field.key().to_uppercase()), Some(*field));
        }
        assert_eq!(Field::all().len(), 32);
    }

    #[test]
    fn time_fields_are_flagged() {
        let times: Vec<_> = Field::all().iter().filter(|f| f.is_time()).map(|f| f.key()).collect();
        assert_eq!(
            times,
            vec![
                "time",
                "sunriseTime",
                "sunsetTime",
                "precipIntensityMaxTime",
                "temperatureMinTime",
                "temperatureMaxTime",
                "apparentTemperatureMinTime",
                "apparentTemperatureMaxTime",
            ]
        );
    }

    #[test]
    fn typed_accessors_read_present_values() {
        let p = point(json!({
            "time": 1700000000,
            "summary": "Drizzle",
            "icon": "rain",
            "precipType": "rain",
            "temperature": 55.2,
            "humidity": 0.81
        }));

        assert_eq!(p.time(), Some(1700000000));
        assert_eq!(p.summary(), Some("Drizzle"));
        assert_eq!(p.icon_kind(), Some(Icon::Rain));
        assert_eq!(p.precip_kind(), Some(PrecipType::Rain));
        assert_eq!(p.temperature(), Some(55.2));
        assert_eq!(p.humidity(), Some(0.81));
        assert!(p.has_humidity());
        assert!(!p.has_pressure());
        assert_eq!(p.pressure(), None);
    }

    #[test]
    fn every_field_is_absent_in_empty_point() {
        let p = point(json!({}));

        for field in Field::all() {
            assert!(!p.has(*field), "{} should be absent", field.key());
            assert_eq!(p.get(*field), None, "{}", field.key());
            assert_eq!(p.lookup(field.key()).unwrap(), None, "{}", field.key());
            if !field.is_time() {
                assert_eq!(p.error(*field).unwrap(), None, "{}", field.key());
            }
        }

        let numbers = [
            p.moon_phase(), p.nearest_storm_distance(), p.nearest_storm_bearing(),
            p.precip_intensity(), p.precip_intensity_max(), p.precip_probability(),
            p.precip_accumulation(), p.temperature(), p.temperature_min(), p.temperature_max(),
            p.apparent_temperature(), p.apparent_temperature_min(), p.apparent_temperature_max(),
            p.dew_point(), p.wind_speed(), p.wind_bearing(), p.cloud_cover(), p.humidity(),
            p.pressure(), p.visibility(), p.ozone(),
        ];
        assert!(numbers.iter().all(Option::is_none));

        let times = [
            p.time(), p.sunrise_time(), p.sunset_time(), p.precip_intensity_max_time(),
            p.temperature_min_time(), p.temperature_max_time(),
            p.apparent_temperature_min_time(), p.apparent_temperature_max_time(),
        ];
        assert!(times.iter().all(Option::is_none));

        assert_eq!(p.summary(), None);
        assert_eq!(p.icon(), None);
        assert_eq!(p.precip_type(), None);

        let has = [
            p.has_time(), p.has_summary(), p.has_icon(), p.has_sunrise_time(),
            p.has_sunset_time(), p.has_moon_phase(), p.has_nearest_storm_distance(),
            p.has_nearest_storm_bearing(), p.has_precip_intensity(), p.has_precip_intensity_max(),
            p.has_precip_intensity_max_time(), p.has_precip_probability(), p.has_precip_type(),
            p.has_precip_accumulation(), p.has_temperature(), p.has_temperature_min(),
            p.has_temperature_min_time(), p.has_temperature_max(), p.has_temperature_max_time(),
            p.has_apparent_temperature(), p.has_apparent_temperature_min(),
            p.has_apparent_temperature_min_time(), p.has_apparent_temperature_max(),
            p.has_apparent_temperature_max_time(), p.has_dew_point(), p.has_wind_speed(),
            p.has_wind_bearing(), p.has_cloud_cover(), p.has_humidity(), p.has_pressure(),
            p.has_visibility(), p.has_ozone(),
        ];
        assert_eq!(has.len(), Field::all().len());
        assert!(has.iter().all(|present| !present));
    }

    #[test]
    fn mistyped_values_degrade_to_none() {
        let p = point(json!({"temperature": "warm", "time": 1.5, "icon": "tornado"}));
        assert!(p.has_temperature());
        assert_eq!(p.temperature(), None);
        assert_eq!(p.time(), None);
        assert_eq!(p.icon(), Some("tornado"));
        assert_eq!(p.icon_kind(), None);
    }

    #[test]
    fn error_companion_is_read_or_absent() {
        let p = point(json!({"precipIntensity": 0.2, "precipIntensityError": 0.05, "humidity": 0.5}));
        assert_eq!(p.error(Field::PrecipIntensity).unwrap(), Some(0.05));
        assert_eq!(p.error(Field::Humidity).unwrap(), None);
    }

    #[test]
    fn error_on_time_field_is_usage_fault() {
        let p = point(json!({"time": 1, "timeError": 2}));
        let err = p.error(Field::Time).unwrap_err();
        assert!(matches!(err, ForecastError::Usage(_)));

        let err = p.lookup("sunriseTimeError").unwrap_err();
        assert!(matches!(err, ForecastError::Usage(_)));
    }

    #[test]
    fn lookup_resolves_bare_and_error_names() {
        let p = point(json!({"humidity": 0.5, "windSpeedError": 1.25}));

        assert_eq!(p.lookup("humidity").unwrap(), Some(&json!(0.5)));
        assert_eq!(p.lookup("Humidity").unwrap(), Some(&json!(0.5)));
        assert_eq!(p.lookup("humidityError").unwrap(), None);
        assert_eq!(p.lookup("windSpeedError").unwrap(), Some(&json!(1.25)));
        assert_eq!(p.lookup("pressure").unwrap(), None);
    }

    #[test]
    fn lookup_unknown_names_fault() {
        let p = point(json!({}));
        for name in ["snowfall", "snowfallError", "Error", "", "é"] {
            let err = p.lookup(name).unwrap_err();
            assert!(matches!(err, ForecastError::Usage(_)), "{name} should fault");
        }
    }

    #[test]
    fn local_time_uses_response_zone() {
        let doc = Node::root(json!({"timezone": "America/New_York", "currently": {"time": 1700000000}}));
        let p = DataPoint::new(doc.child("currently").unwrap());

        let local = p.local_time().unwrap();
        assert_eq!(local.to_rfc3339(), "2023-11-14T17:13:20-05:00");
        assert!(p.local(Field::SunsetTime).unwrap().is_none());
        assert!(p.local(Field::Temperature).is_err());
    }
}
