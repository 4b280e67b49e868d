use super::Node;
use crate::Units;

/// Data source that can contribute station identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationSource {
    DarkSky,
    DataPoint,
    Isd,
    Madis,
    Lamp,
    Metar,
}

impl StationSource {
    pub fn key(&self) -> &'static str {
        match self {
            StationSource::DarkSky => "darksky-stations",
            StationSource::DataPoint => "datapoint-stations",
            StationSource::Isd => "isd-stations",
            StationSource::Madis => "madis-stations",
            StationSource::Lamp => "lamp-stations",
            StationSource::Metar => "metar-stations",
        }
    }

    pub const fn all() -> &'static [StationSource] {
        &[
            StationSource::DarkSky,
            StationSource::DataPoint,
            StationSource::Isd,
            StationSource::Madis,
            StationSource::Lamp,
            StationSource::Metar,
        ]
    }
}

/// Response metadata: sources consulted and the units applied.
#[derive(Debug, Clone)]
pub struct Flags {
    node: Node,
}

impl Flags {
    pub(crate) fn new(node: Node) -> Self {
        Self { node }
    }

    pub fn has_darksky_unavailable(&self) -> bool {
        self.node.has("darksky-unavailable")
    }

    /// `Some(false)` is a reported value, distinct from an absent flag.
    pub fn darksky_unavailable(&self) -> Option<bool> {
        self.node.boolean("darksky-unavailable")
    }

    pub fn has_stations(&self, source: StationSource) -> bool {
        self.node.has(source.key())
    }

    pub fn stations(&self, source: StationSource) -> Option<Vec<&str>> {
        self.node.strings(source.key())
    }

    pub fn has_metno_license(&self) -> bool {
        self.node.has("metno-license")
    }

    pub fn metno_license(&self) -> Option<&str> {
        self.node.text("metno-license")
    }

    pub fn has_sources(&self) -> bool {
        self.node.has("sources")
    }

    pub fn sources(&self) -> Option<Vec<&str>> {
        self.node.strings("sources")
    }

    pub fn has_units(&self) -> bool {
        self.node.has("units")
    }

    /// Units code exactly as reported.
    pub fn units(&self) -> Option<&str> {
        self.node.text("units")
    }

    /// Reported units code, parsed. Unknown codes read as `None`.
    pub fn unit_system(&self) -> Option<Units> {
        self.units().and_then(|code| Units::try_from(code).ok())
    }
}
