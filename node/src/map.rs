use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{self, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AreaId, AreaLayer, AreaLayerSummary, Error, Missing, QuadTree, Result};

pub type MapId = u64;

/// A named collection of area layers, persisted as one JSON document.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "MapRecord")]
pub struct Map {
    id: MapId,
    description: String,
    area_layers: Vec<AreaLayer>,
    /// where [`Map::save`] writes when not given a destination
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Deserialize)]
struct MapRecord {
    id: MapId,
    description: String,
    #[serde(default)]
    area_layers: Vec<AreaLayer>,
}
impl TryFrom<MapRecord> for Map {
    type Error = Error;

    fn try_from(record: MapRecord) -> Result<Self> {
        let mut ids = BTreeSet::new();
        if let Some(layer) = record.area_layers.iter().find(|layer| !ids.insert(layer.id())) {
            return Err(Error::format(format!("area layer id {} is used twice", layer.id())));
        }
        Ok(Self {
            id: record.id,
            description: record.description,
            area_layers: record.area_layers,
            path: None,
        })
    }
}

#[derive(Serialize)]
struct MapSummary<'a> {
    id: MapId,
    description: &'a str,
    area_layers: Vec<AreaLayerSummary<'a>>,
}

impl Map {
    pub fn new(id: MapId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            area_layers: Vec::new(),
            path: None,
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn area_layers(&self) -> &[AreaLayer] {
        &self.area_layers
    }

    pub fn area_layer(&self, id: AreaId) -> Result<&AreaLayer> {
        self.area_layers
            .iter()
            .find(|layer| layer.id() == id)
            .ok_or(Error::NotFound(Missing::AreaLayer(id)))
    }
    pub fn area_layer_mut(&mut self, id: AreaId) -> Result<&mut AreaLayer> {
        self.area_layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .ok_or(Error::NotFound(Missing::AreaLayer(id)))
    }
    /// Appends an empty layer, every cell holding data id `0`.
    pub fn add_area_layer(&mut self, description: impl Into<String>) -> AreaId {
        let id = self
            .area_layers
            .iter()
            .map(AreaLayer::id)
            .max()
            .map_or(0, |id| id + 1);
        debug!(map = self.id, layer = id, "add area layer");
        self.area_layers
            .push(AreaLayer::new(id, description, QuadTree::new(0)));
        id
    }

    /// `{id, description, area_layers}`, layers with their grids and history only if `full`.
    pub fn to_json(&self, full: bool) -> Result<serde_json::Value> {
        if full {
            return Ok(serde_json::to_value(self)?);
        }
        Ok(serde_json::to_value(MapSummary {
            id: self.id,
            description: &self.description,
            area_layers: self.area_layers.iter().map(AreaLayer::summary).collect(),
        })?)
    }

    pub fn path(&self) -> Option<&path::Path> {
        self.path.as_deref()
    }
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Writes the full map to `dest`, or to [`Map::path`] when `dest` is `None`.
    ///
    /// The document is written next to the destination first and renamed over it.
    pub fn save(&self, dest: Option<&path::Path>) -> Result<()> {
        let dest = dest
            .or(self.path.as_deref())
            .ok_or(Error::MissingDestination)?;
        let mut tmp = OsString::from(dest.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let written = self
            .write_to(&tmp)
            .and_then(|()| fs::rename(&tmp, dest).map_err(Error::from));
        if let Err(error) = written {
            let _ = fs::remove_file(&tmp);
            return Err(error);
        }
        debug!(map = self.id, path = %dest.display(), "saved map");
        Ok(())
    }

    fn write_to(&self, path: &path::Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        Ok(())
    }

    /// Reads a map saved by [`Map::save`], remembering `path` as its destination.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let reader = BufReader::new(File::open(&path)?);
        let mut map: Self = serde_json::from_reader(reader)?;
        debug!(map = map.id, path = %path.display(), layers = map.area_layers.len(), "loaded map");
        map.path = Some(path);
        Ok(map)
    }
}
