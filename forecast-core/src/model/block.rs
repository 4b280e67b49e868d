use std::sync::OnceLock;

use super::{DataPoint, Icon, Node};

/// A run of data points at one cadence (minutely, hourly or daily).
#[derive(Debug, Clone)]
pub struct DataBlock {
    node: Node,
    data: OnceLock<Option<Vec<DataPoint>>>,
}

impl DataBlock {
    pub(crate) fn new(node: Node) -> Self {
        Self {
            node,
            data: OnceLock::new(),
        }
    }

    pub fn has_summary(&self) -> bool {
        self.node.has("summary")
    }

    pub fn summary(&self) -> Option<&str> {
        self.node.text("summary")
    }

    pub fn has_icon(&self) -> bool {
        self.node.has("icon")
    }

    pub fn icon(&self) -> Option<&str> {
        self.node.text("icon")
    }

    pub fn icon_kind(&self) -> Option<Icon> {
        self.icon().and_then(Icon::from_code)
    }

    pub fn has_data(&self) -> bool {
        self.node.has("data")
    }

    /// Points in the order the API returned them, or `None` when the block
    /// carries no `data` array.
    pub fn data(&self) -> Option<&[DataPoint]> {
        self.data
            .get_or_init(|| {
                self.node
                    .elements("data")
                    .map(|nodes| nodes.into_iter().map(DataPoint::new).collect())
            })
            .as_deref()
    }

    /// Same as [`data`](Self::data) with absence read as empty.
    pub fn entries(&self) -> &[DataPoint] {
        self.data().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.entries().iter()
    }
}

impl<'a> IntoIterator for &'a DataBlock {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
