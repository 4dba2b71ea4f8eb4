use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{AreaId, DataId, MapId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// malformed serialized tree, color or persisted document
    #[error("format error: {reason}")]
    Format { reason: String },
    #[error("area data id {id} already exists")]
    DuplicateId { id: DataId },
    #[error("{0} not found")]
    NotFound(Missing),
    #[error("no destination to save the map to")]
    MissingDestination,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
impl Error {
    pub(crate) fn format(reason: impl Display) -> Self {
        Self::Format {
            reason: reason.to_string(),
        }
    }
}
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Self::Io(error.into())
        } else {
            Self::format(error)
        }
    }
}

/// what a [`Error::NotFound`] was looking for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    Map(MapId),
    AreaLayer(AreaId),
    AreaData(DataId),
    /// node is not a descendant of the searched tree
    Node,
}
impl Display for Missing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map(id) => write!(f, "map {id}"),
            Self::AreaLayer(id) => write!(f, "area layer {id}"),
            Self::AreaData(id) => write!(f, "area data {id}"),
            Self::Node => write!(f, "node"),
        }
    }
}
