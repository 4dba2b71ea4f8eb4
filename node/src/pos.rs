use crate::Quadrant;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
/// x increases to the east
/// y increases to the south
///
/// Coordinates are read least significant bit first: bit `k` of each selects the quadrant at
/// depth `k + 1`.
pub struct Pos {
    pub x: u64,
    pub y: u64,
}
impl Pos {
    pub const fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
    /// quadrant selected at the current level
    pub fn quadrant(self) -> Quadrant {
        Quadrant::from_bits(self.x, self.y)
    }
    /// drops the bit pair consumed by [`Pos::quadrant`]
    pub(crate) fn descend(self) -> Self {
        Self {
            x: self.x >> 1,
            y: self.y >> 1,
        }
    }
}
