//! Mapping between grid coordinates and paths of quadrant selectors

use std::ops::Deref;

use crate::{Pos, Quadrant};

/// `length` bits of `pos`, least significant first, zero padded on the high end
pub fn path_from_position(pos: u64, length: usize) -> Vec<u8> {
    (0..length)
        .map(|k| u8::from(k < 64 && (pos >> k) & 1 == 1))
        .collect()
}

/// inverse of [`path_from_position`]: bit `k` of the result is `bits[k]`
pub fn position_from_path(bits: &[u8]) -> u64 {
    bits.iter()
        .rev()
        .fold(0, |pos, &bit| (pos << 1) | u64::from(bit & 1))
}

/// Reverses the low `unit` bits of `pos`.
///
/// Walking codes `0, 1, 2, ..` and converting each back with [`position_from_morton`] visits
/// positions in the order the tree recurses, which keeps consecutive `set` calls on nearby nodes.
pub fn morton_code(pos: u64, unit: u32) -> u64 {
    match unit {
        0 => 0,
        unit => pos.reverse_bits() >> (64 - unit.min(64)),
    }
}

/// inverse of [`morton_code`] (bit reversal is its own inverse)
pub fn position_from_morton(code: u64, unit: u32) -> u64 {
    morton_code(code, unit)
}

/// positions whose morton codes lie in `morton_code(start)..morton_code(end)`
pub fn range_morton(start: u64, end: u64, unit: u32) -> impl Iterator<Item = u64> {
    (morton_code(start, unit)..morton_code(end, unit))
        .map(move |code| position_from_morton(code, unit))
}

/// Quadrant selectors from the root down to a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Quadrant>);
impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }
    /// address of `pos` at exactly `depth` levels below the root
    pub fn from_position(pos: Pos, depth: usize) -> Self {
        let xs = path_from_position(pos.x, depth);
        let ys = path_from_position(pos.y, depth);
        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Quadrant::from_bits(x.into(), y.into()))
            .collect()
    }
    /// the smallest coordinates covered by the addressed node
    pub fn position(&self) -> Pos {
        let xs: Vec<u8> = self.0.iter().map(|q| u8::from(q.x_bit() == 1)).collect();
        let ys: Vec<u8> = self.0.iter().map(|q| u8::from(q.y_bit() == 1)).collect();
        Pos::new(position_from_path(&xs), position_from_path(&ys))
    }
    pub fn depth(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, quadrant: Quadrant) {
        self.0.push(quadrant);
    }
    pub fn pop(&mut self) -> Option<Quadrant> {
        self.0.pop()
    }
}
impl Deref for Path {
    type Target = [Quadrant];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl FromIterator<Quadrant> for Path {
    fn from_iter<T: IntoIterator<Item = Quadrant>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl From<Vec<Quadrant>> for Path {
    fn from(quadrants: Vec<Quadrant>) -> Self {
        Self(quadrants)
    }
}
