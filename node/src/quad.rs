//! Quadrant selectors and the 4-slot container indexed by them

use std::ops::{Index, IndexMut};

/// One of the 4 equal-area children of a divided node.
///
/// The discriminant is the quadrant index `2 * y_bit + x_bit`, x increasing to the east and y
/// increasing to the south.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}
impl Quadrant {
    pub fn from_bits(x_bit: u64, y_bit: u64) -> Self {
        match (x_bit & 1, y_bit & 1) {
            (0, 0) => Self::NW,
            (1, 0) => Self::NE,
            (0, _) => Self::SW,
            _ => Self::SE,
        }
    }
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::NW),
            1 => Some(Self::NE),
            2 => Some(Self::SW),
            3 => Some(Self::SE),
            _ => None,
        }
    }
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn x_bit(self) -> u64 {
        match self {
            Self::NW | Self::SW => 0,
            Self::NE | Self::SE => 1,
        }
    }
    pub fn y_bit(self) -> u64 {
        match self {
            Self::NW | Self::NE => 0,
            Self::SW | Self::SE => 1,
        }
    }

    /// in index order
    pub fn iter_all() -> impl ExactSizeIterator<Item = Quadrant> + Clone {
        [Self::NW, Self::NE, Self::SW, Self::SE].into_iter()
    }
}

/// exactly 4 values, one per [`Quadrant`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Quad<T> {
    pub nw: T,
    pub ne: T,
    pub sw: T,
    pub se: T,
}
impl<T> Quad<T> {
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Quad {
            nw: value.clone(),
            ne: value.clone(),
            sw: value.clone(),
            se: value,
        }
    }
    pub fn from_fn(mut f: impl FnMut(Quadrant) -> T) -> Self {
        Quad {
            nw: f(Quadrant::NW),
            ne: f(Quadrant::NE),
            sw: f(Quadrant::SW),
            se: f(Quadrant::SE),
        }
    }
    pub fn as_ref(&self) -> Quad<&T> {
        Quad {
            nw: &self.nw,
            ne: &self.ne,
            sw: &self.sw,
            se: &self.se,
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        Quadrant::iter_all().map(|q| &self[q])
    }
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quad<U> {
        Quad {
            nw: f(self.nw),
            ne: f(self.ne),
            sw: f(self.sw),
            se: f(self.se),
        }
    }
    pub fn zip_map<U, V>(self, other: Quad<U>, mut f: impl FnMut(T, U) -> V) -> Quad<V> {
        Quad {
            nw: f(self.nw, other.nw),
            ne: f(self.ne, other.ne),
            sw: f(self.sw, other.sw),
            se: f(self.se, other.se),
        }
    }
}
impl<T> IntoIterator for Quad<T> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 4>;
    fn into_iter(self) -> Self::IntoIter {
        [self.nw, self.ne, self.sw, self.se].into_iter()
    }
}
impl<T> Index<Quadrant> for Quad<T> {
    type Output = T;
    fn index(&self, index: Quadrant) -> &Self::Output {
        match index {
            Quadrant::NW => &self.nw,
            Quadrant::NE => &self.ne,
            Quadrant::SW => &self.sw,
            Quadrant::SE => &self.se,
        }
    }
}
impl<T> IndexMut<Quadrant> for Quad<T> {
    fn index_mut(&mut self, index: Quadrant) -> &mut Self::Output {
        match index {
            Quadrant::NW => &mut self.nw,
            Quadrant::NE => &mut self.ne,
            Quadrant::SW => &mut self.sw,
            Quadrant::SE => &mut self.se,
        }
    }
}
