use serde_json::Value;
use std::sync::OnceLock;

use super::{Alert, DataBlock, DataPoint, Flags, Node};
use crate::units::{Quantity, Units, unit_symbol};

static NULL: Value = Value::Null;

/// Root of a forecast response.
///
/// Blocks, alerts and flags are wrapped on first access; later calls return
/// the same instance.
#[derive(Debug, Clone)]
pub struct Forecast {
    node: Node,
    currently: OnceLock<Option<DataPoint>>,
    minutely: OnceLock<Option<DataBlock>>,
    hourly: OnceLock<Option<DataBlock>>,
    daily: OnceLock<Option<DataBlock>>,
    alerts: OnceLock<Option<Vec<Alert>>>,
    flags: OnceLock<Option<Flags>>,
    units: OnceLock<Option<Units>>,
}

impl Forecast {
    pub fn new(document: Value) -> Self {
        Self {
            node: Node::root(document),
            currently: OnceLock::new(),
            minutely: OnceLock::new(),
            hourly: OnceLock::new(),
            daily: OnceLock::new(),
            alerts: OnceLock::new(),
            flags: OnceLock::new(),
            units: OnceLock::new(),
        }
    }

    /// The parsed document this forecast was built from.
    pub fn raw(&self) -> &Value {
        self.node.value().unwrap_or(&NULL)
    }

    pub fn has_latitude(&self) -> bool {
        self.node.has("latitude")
    }

    pub fn latitude(&self) -> Option<f64> {
        self.node.number("latitude")
    }

    pub fn has_longitude(&self) -> bool {
        self.node.has("longitude")
    }

    pub fn longitude(&self) -> Option<f64> {
        self.node.number("longitude")
    }

    pub fn has_timezone(&self) -> bool {
        self.node.has("timezone")
    }

    /// IANA timezone name, e.g. `"America/New_York"`.
    pub fn timezone(&self) -> Option<&str> {
        self.node.timezone()
    }

    pub fn has_offset(&self) -> bool {
        self.node.has("offset")
    }

    /// UTC offset in hours; may be fractional.
    pub fn offset(&self) -> Option<f64> {
        self.node.number("offset")
    }

    pub fn has_currently(&self) -> bool {
        self.node.has("currently")
    }

    pub fn currently(&self) -> Option<&DataPoint> {
        self.currently
            .get_or_init(|| self.node.child("currently").map(DataPoint::new))
            .as_ref()
    }

    pub fn has_minutely(&self) -> bool {
        self.node.has("minutely")
    }

    pub fn minutely(&self) -> Option<&DataBlock> {
        self.minutely
            .get_or_init(|| self.node.child("minutely").map(DataBlock::new))
            .as_ref()
    }

    pub fn has_hourly(&self) -> bool {
        self.node.has("hourly")
    }

    pub fn hourly(&self) -> Option<&DataBlock> {
        self.hourly
            .get_or_init(|| self.node.child("hourly").map(DataBlock::new))
            .as_ref()
    }

    pub fn has_daily(&self) -> bool {
        self.node.has("daily")
    }

    pub fn daily(&self) -> Option<&DataBlock> {
        self.daily
            .get_or_init(|| self.node.child("daily").map(DataBlock::new))
            .as_ref()
    }

    pub fn has_alerts(&self) -> bool {
        self.node.has("alerts")
    }

    /// Alerts in source order. `None` when the key is missing or not an array.
    pub fn alerts(&self) -> Option<&[Alert]> {
        self.alerts
            .get_or_init(|| {
                self.node
                    .elements("alerts")
                    .map(|nodes| nodes.into_iter().map(Alert::new).collect())
            })
            .as_deref()
    }

    pub fn has_flags(&self) -> bool {
        self.node.has("flags")
    }

    pub fn flags(&self) -> Option<&Flags> {
        self.flags
            .get_or_init(|| self.node.child("flags").map(Flags::new))
            .as_ref()
    }

    /// Units mode reported in the flags, read once.
    pub fn units(&self) -> Option<Units> {
        *self
            .units
            .get_or_init(|| self.flags().and_then(Flags::unit_system))
    }

    /// Unit symbol for `quantity` under the reported units mode.
    pub fn unit(&self, quantity: Quantity) -> Option<&'static str> {
        self.units().and_then(|units| unit_symbol(quantity, units))
    }

    pub fn nearest_storm_distance_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::NearestStormDistance)
    }

    pub fn precip_intensity_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::PrecipIntensity)
    }

    pub fn precip_accumulation_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::PrecipAccumulation)
    }

    pub fn temperature_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::Temperature)
    }

    pub fn wind_speed_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::WindSpeed)
    }

    pub fn pressure_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::Pressure)
    }

    pub fn visibility_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::Visibility)
    }

    pub fn ozone_unit(&self) -> Option<&'static str> {
        self.unit(Quantity::Ozone)
    }
}

impl From<Value> for Forecast {
    fn from(document: Value) -> Self {
        Forecast::new(document)
    }
}
