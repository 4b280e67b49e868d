use chrono::{DateTime, NaiveDateTime, Utc};
use std::{fmt, str::FromStr};

use crate::ForecastError;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Point in time to request a forecast (or observation) for.
///
/// Either epoch seconds or `YYYY-MM-DDTHH:MM:SS`, optionally suffixed with
/// `Z` or a `+HHMM`/`-HHMM` offset. Without a suffix the time is local to the
/// requested location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastTime {
    Unix(i64),
    Iso(String),
}

impl ForecastTime {
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ForecastTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastTime::Unix(ts) => write!(f, "{ts}"),
            ForecastTime::Iso(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ForecastTime {
    fn from(ts: i64) -> Self {
        ForecastTime::Unix(ts)
    }
}

impl From<DateTime<Utc>> for ForecastTime {
    fn from(dt: DateTime<Utc>) -> Self {
        ForecastTime::Iso(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}

impl FromStr for ForecastTime {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(ts) = s.parse::<i64>() {
            return Ok(ForecastTime::Unix(ts));
        }

        let valid = if let Some(naive) = s.strip_suffix('Z') {
            NaiveDateTime::parse_from_str(naive, ISO_FORMAT).is_ok()
        } else {
            NaiveDateTime::parse_from_str(s, ISO_FORMAT).is_ok()
                || DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z").is_ok()
        };

        if valid {
            Ok(ForecastTime::Iso(s.to_string()))
        } else {
            Err(ForecastError::Usage(format!(
                "Unsupported time '{s}'. Use epoch seconds or YYYY-MM-DDTHH:MM:SS[Z|+HHMM]."
            )))
        }
    }
}
