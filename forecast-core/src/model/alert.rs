use chrono::DateTime;
use chrono_tz::Tz;

use super::{Node, localize};

/// A severe weather alert issued for the requested location.
#[derive(Debug, Clone)]
pub struct Alert {
    node: Node,
}

impl Alert {
    pub(crate) fn new(node: Node) -> Self {
        Self { node }
    }

    pub fn has_title(&self) -> bool {
        self.node.has("title")
    }

    pub fn title(&self) -> Option<&str> {
        self.node.text("title")
    }

    pub fn has_expires(&self) -> bool {
        self.node.has("expires")
    }

    /// Expiry as epoch seconds.
    pub fn expires(&self) -> Option<i64> {
        self.node.integer("expires")
    }

    /// Expiry in the response timezone.
    pub fn expires_at(&self) -> Option<DateTime<Tz>> {
        self.expires().and_then(|ts| localize(ts, self.node.timezone()))
    }

    pub fn has_description(&self) -> bool {
        self.node.has("description")
    }

    pub fn description(&self) -> Option<&str> {
        self.node.text("description")
    }

    pub fn has_uri(&self) -> bool {
        self.node.has("uri")
    }

    pub fn uri(&self) -> Option<&str> {
        self.node.text("uri")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_fields_and_absence() {
        let root = Node::root(json!({
            "timezone": "Europe/London",
            "alert": {"title": "Flood Warning", "expires": 1700000000, "uri": "https://example.test/a"}
        }));
        let alert = Alert::new(root.child("alert").unwrap());

        assert_eq!(alert.title(), Some("Flood Warning"));
        assert_eq!(alert.uri(), Some("https://example.test/a"));
        assert!(!alert.has_description());
        assert_eq!(alert.description(), None);
        assert_eq!(
            alert.expires_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }
}
