//! Nested array format: `[value]` for a leaf, `[value, nw, ne, sw, se]` for a divided node.

use std::fmt::Formatter;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, Error as _, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Quad, QuadTree, Result};

impl<V: Serialize> Serialize for QuadTree<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(value)?;
                seq.end()
            }
            Self::Divided(value, children) => {
                let mut seq = serializer.serialize_seq(Some(5))?;
                seq.serialize_element(value)?;
                for child in children.iter() {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for QuadTree<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TreeVisitor(PhantomData))
    }
}

struct TreeVisitor<V>(PhantomData<V>);
impl<'de, V: Deserialize<'de>> Visitor<'de> for TreeVisitor<V> {
    type Value = QuadTree<V>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an array of a value optionally followed by exactly 4 child trees")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let value: V = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let Some(nw) = seq.next_element()? else {
            return Ok(QuadTree::Leaf(value));
        };
        let ne = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(2, &self))?;
        let sw = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(3, &self))?;
        let se = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(4, &self))?;
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(A::Error::invalid_length(6, &self));
        }
        Ok(QuadTree::new_divided(value, Quad { nw, ne, sw, se }))
    }
}

impl<V: Serialize> QuadTree<V> {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
impl<V: DeserializeOwned> QuadTree<V> {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
