//! Read-only views over a parsed forecast document.
//!
//! Every wrapper points into the same shared JSON document. Missing or
//! mistyped fields read as `None`; child wrappers are built on first access
//! and the same instance is handed out afterwards.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;

pub mod alert;
pub mod block;
pub mod flags;
pub mod forecast;
pub mod point;

pub use alert::Alert;
pub use block::DataBlock;
pub use flags::{Flags, StationSource};
pub use forecast::Forecast;
pub use point::{DataPoint, Field, FieldKind, Icon, PrecipType};

/// Location of a sub-tree inside the shared document.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    doc: Arc<Value>,
    pointer: String,
    timezone: Option<Arc<str>>,
}

impl Node {
    pub(crate) fn root(doc: Value) -> Self {
        let timezone = doc.get("timezone").and_then(Value::as_str).map(Arc::from);
        Self {
            doc: Arc::new(doc),
            pointer: String::new(),
            timezone,
        }
    }

    pub(crate) fn value(&self) -> Option<&Value> {
        self.doc.pointer(&self.pointer)
    }

    pub(crate) fn field(&self, key: &str) -> Option<&Value> {
        self.value()?.get(key)
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.value()
            .and_then(Value::as_object)
            .is_some_and(|obj| obj.contains_key(key))
    }

    pub(crate) fn number(&self, key: &str) -> Option<f64> {
        self.field(key)?.as_f64()
    }

    pub(crate) fn integer(&self, key: &str) -> Option<i64> {
        self.field(key)?.as_i64()
    }

    pub(crate) fn text(&self, key: &str) -> Option<&str> {
        self.field(key)?.as_str()
    }

    pub(crate) fn boolean(&self, key: &str) -> Option<bool> {
        self.field(key)?.as_bool()
    }

    pub(crate) fn strings(&self, key: &str) -> Option<Vec<&str>> {
        let items = self.field(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }

    pub(crate) fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Node for an object member, if that member is present.
    pub(crate) fn child(&self, key: &str) -> Option<Node> {
        if !self.has(key) {
            return None;
        }
        Some(self.descend(&escape_pointer(key)))
    }

    /// Nodes for every element of the array under `key`, in source order.
    pub(crate) fn elements(&self, key: &str) -> Option<Vec<Node>> {
        let len = self.field(key)?.as_array()?.len();
        let base = self.descend(&escape_pointer(key));
        Some((0..len).map(|i| base.descend(&i.to_string())).collect())
    }

    fn descend(&self, token: &str) -> Node {
        Node {
            doc: Arc::clone(&self.doc),
            pointer: format!("{}/{}", self.pointer, token),
            timezone: self.timezone.clone(),
        }
    }
}

fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Resolve an epoch timestamp in the named IANA zone, falling back to UTC.
pub(crate) fn localize(timestamp: i64, timezone: Option<&str>) -> Option<DateTime<Tz>> {
    let tz = timezone
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC);
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&tz))
}
