//! Square RGB images drawn from, and read into, trees.

use crate::{position_from_morton, Color, Error, QuadTree, Result};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Raster {
    side: usize,
    /// row-major
    pixels: Vec<Color>,
}
impl Raster {
    pub fn new(side: usize, fill: Color) -> Self {
        Self {
            side,
            pixels: vec![fill; side * side],
        }
    }
    pub fn from_pixels(side: usize, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != side * side {
            return Err(Error::format(format!(
                "{} pixels do not make a {side}x{side} raster",
                pixels.len()
            )));
        }
        Ok(Self { side, pixels })
    }
    pub fn side(&self) -> usize {
        self.side
    }
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.side + x]
    }
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Color) {
        if self.side == 0 {
            return;
        }
        for row in self.pixels.chunks_mut(self.side).take(y1).skip(y0) {
            row[x0..x1].fill(color);
        }
    }
}

impl<V> QuadTree<V> {
    /// Draws the tree onto a `side` x `side` raster, each leaf a square of its palette color.
    ///
    /// Leaves smaller than a pixel share it with their neighbours, the last one drawn wins.
    pub fn render(&self, side: usize, palette: impl Fn(&V) -> Color) -> Raster {
        let mut raster = Raster::new(side, Color::BLACK);
        self.fill(&mut raster, [0, 0, side, side], &palette);
        raster
    }
    fn fill(&self, raster: &mut Raster, rect: [usize; 4], palette: &impl Fn(&V) -> Color) {
        let [x0, y0, x1, y1] = rect;
        match self {
            Self::Leaf(value) => raster.fill_rect(x0, y0, x1, y1, palette(value)),
            Self::Divided(_, children) => {
                let mx = x0 + (x1 - x0) / 2;
                let my = y0 + (y1 - y0) / 2;
                children.nw.fill(raster, [x0, y0, mx, my], palette);
                children.ne.fill(raster, [mx, y0, x1, my], palette);
                children.sw.fill(raster, [x0, my, mx, y1], palette);
                children.se.fill(raster, [mx, my, x1, y1], palette);
            }
        }
    }
}

/// Builds a tree with one leaf level per bit of the raster side, which must be a power of 2.
///
/// The pixel at `(column, row)` lands on the address whose bits are those of `column` and `row`
/// reversed (see [`morton_code`](crate::morton_code)), so rows are read in raster order while
/// the tree is addressed from the root down. Only pixels whose value differs from `base` are set.
pub fn import_raster<V>(
    raster: &Raster,
    base: V,
    mut classify: impl FnMut(Color) -> V,
) -> Result<QuadTree<V>>
where
    V: Clone + PartialEq,
{
    let side = raster.side();
    if !side.is_power_of_two() {
        return Err(Error::format(format!("raster side {side} is not a power of 2")));
    }
    let unit = side.trailing_zeros();
    let depth = unit as usize;
    let mut tree = QuadTree::new(base.clone());
    for row in 0..side {
        let y = position_from_morton(row as u64, unit);
        for column in 0..side {
            let x = position_from_morton(column as u64, unit);
            let value = classify(raster.get(column, row));
            if value != base {
                tree.set(x, y, depth, value);
            }
        }
    }
    Ok(tree)
}
