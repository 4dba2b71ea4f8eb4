//! Versioned grids: a base snapshot, a time ordered delta log and a legend for leaf values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace_span};

use crate::{Color, Delta, Error, Missing, QuadTree, Raster, Result};

pub type DataId = u64;
pub type AreaId = u64;

/// drawn for leaf values missing from the legend
const UNKNOWN_DATA_COLOR: Color = Color::new(0, 255, 0);

/// Legend entry describing what a leaf value means.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AreaData {
    pub id: DataId,
    pub description: String,
    pub color: Color,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AreaDelta {
    pub time: f64,
    pub delta: Delta<DataId>,
}

/// One versioned grid.
///
/// `tree` is always the fold of `initial_tree` with every delta, in time order, through
/// [`QuadTree::apply`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "AreaLayerRecord")]
pub struct AreaLayer {
    id: AreaId,
    description: String,
    metadata: BTreeMap<DataId, AreaData>,
    initial_tree: QuadTree<DataId>,
    tree: QuadTree<DataId>,
    deltas: Vec<AreaDelta>,
}

impl AreaLayer {
    /// `initial_tree` is canonicalized first.
    pub fn new(id: AreaId, description: impl Into<String>, mut initial_tree: QuadTree<DataId>) -> Self {
        initial_tree.canonicalize();
        Self {
            id,
            description: description.into(),
            metadata: BTreeMap::new(),
            tree: initial_tree.clone(),
            initial_tree,
            deltas: Vec::new(),
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn tree(&self) -> &QuadTree<DataId> {
        &self.tree
    }
    pub fn initial_tree(&self) -> &QuadTree<DataId> {
        &self.initial_tree
    }
    /// sorted by time, equal times in insertion order
    pub fn deltas(&self) -> &[AreaDelta] {
        &self.deltas
    }
    pub fn metadata(&self) -> &BTreeMap<DataId, AreaData> {
        &self.metadata
    }

    /// Inserts `delta` after every delta with a time `<= time` and replays the log.
    ///
    /// Returns the index the delta was stored at.
    pub fn add_delta(&mut self, time: f64, delta: Delta<DataId>) -> Result<usize> {
        check_time(time)?;
        let index = self.deltas.partition_point(|d| d.time <= time);
        debug!(layer = self.id, time, index, "insert delta");
        self.deltas.insert(index, AreaDelta { time, delta });
        self.synchronize();
        Ok(index)
    }

    /// The delta that undoes `delta` if it were applied to the current tree.
    pub fn reversal(&self, delta: &Delta<DataId>) -> Delta<DataId> {
        self.tree.trace(delta)
    }

    /// The grid as it was once every delta up to and including `time` had been applied.
    pub fn tree_at(&self, time: f64) -> QuadTree<DataId> {
        let end = self.deltas.partition_point(|d| d.time <= time);
        fold(&self.initial_tree, &self.deltas[..end])
    }

    fn synchronize(&mut self) {
        let _span = trace_span!("synchronize", layer = self.id, deltas = self.deltas.len()).entered();
        self.tree = fold(&self.initial_tree, &self.deltas);
    }

    /// `0` for an empty legend, one past the largest id otherwise
    pub fn new_data_id(&self) -> DataId {
        self.metadata.keys().next_back().map_or(0, |id| id + 1)
    }
    pub fn add_data(&mut self, data: AreaData) -> Result<()> {
        if self.metadata.contains_key(&data.id) {
            return Err(Error::DuplicateId { id: data.id });
        }
        debug!(layer = self.id, data = data.id, "add area data");
        self.metadata.insert(data.id, data);
        Ok(())
    }
    pub fn insert_data(&mut self, description: impl Into<String>, color: Color) -> DataId {
        let id = self.new_data_id();
        debug!(layer = self.id, data = id, "add area data");
        self.metadata.insert(
            id,
            AreaData {
                id,
                description: description.into(),
                color,
            },
        );
        id
    }
    pub fn data(&self, id: DataId) -> Result<&AreaData> {
        self.metadata
            .get(&id)
            .ok_or(Error::NotFound(Missing::AreaData(id)))
    }

    /// Draws the current tree with each value in its legend color.
    pub fn render(&self, side: usize) -> Raster {
        self.tree.render(side, |id| {
            self.metadata
                .get(id)
                .map_or(UNKNOWN_DATA_COLOR, |data| data.color)
        })
    }

    /// Serializes as `{id, description, metadata}`, without the grid or its history.
    pub fn summary(&self) -> AreaLayerSummary<'_> {
        AreaLayerSummary {
            id: self.id,
            description: &self.description,
            metadata: &self.metadata,
        }
    }
}

/// infinite times do not survive a JSON round trip
fn check_time(time: f64) -> Result<()> {
    if time.is_finite() {
        Ok(())
    } else {
        Err(Error::format(format!("delta time {time} is not finite")))
    }
}

fn fold(initial: &QuadTree<DataId>, deltas: &[AreaDelta]) -> QuadTree<DataId> {
    deltas
        .iter()
        .fold(initial.clone(), |tree, d| tree.apply(&d.delta))
}

#[derive(Serialize)]
pub struct AreaLayerSummary<'a> {
    id: AreaId,
    description: &'a str,
    metadata: &'a BTreeMap<DataId, AreaData>,
}

// the stored `tree` is ignored, it is rebuilt from the log
#[derive(Deserialize)]
struct AreaLayerRecord {
    id: AreaId,
    description: String,
    #[serde(default)]
    metadata: BTreeMap<DataId, AreaData>,
    #[serde(default)]
    initial_tree: QuadTree<DataId>,
    #[serde(default)]
    deltas: Vec<AreaDelta>,
}
impl TryFrom<AreaLayerRecord> for AreaLayer {
    type Error = Error;

    fn try_from(record: AreaLayerRecord) -> Result<Self> {
        if let Some((key, data)) = record.metadata.iter().find(|(key, data)| **key != data.id) {
            return Err(Error::format(format!(
                "area data {} is stored under id {key}",
                data.id
            )));
        }
        let mut deltas = record.deltas;
        for delta in &deltas {
            check_time(delta.time)?;
        }
        deltas.sort_by(|a, b| a.time.total_cmp(&b.time));
        let mut layer = Self::new(record.id, record.description, record.initial_tree);
        layer.metadata = record.metadata;
        layer.deltas = deltas;
        layer.synchronize();
        Ok(layer)
    }
}
