use crate::{position_from_morton, Path, Pos, Quad, QuadTree, Quadrant};

impl<V> QuadTree<V> {
    /// Descends from `self` along the low bits of `x` and `y`, one bit pair per level.
    ///
    /// Stops after `max_depth` levels or at the first leaf, whichever comes first, so the
    /// returned node may be divided.
    pub fn get(&self, x: u64, y: u64, max_depth: usize) -> &Self {
        let mut pos = Pos::new(x, y);
        let mut node = self;
        for _ in 0..max_depth {
            match node {
                Self::Leaf(_) => break,
                Self::Divided(_, children) => {
                    node = &children[pos.quadrant()];
                    pos = pos.descend();
                }
            }
        }
        node
    }
    /// value of the leaf covering `(x, y)`
    pub fn value_at(&self, x: u64, y: u64) -> &V {
        self.get(x, y, usize::MAX).value()
    }
    /// node at exactly `path`, `None` if the tree is not divided that far
    pub fn node_at(&self, path: &[Quadrant]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, &q| node.children().map(|children| &children[q]))
    }

    /// Sets the `depth` level node at `(x, y)` to a leaf holding `value`, dividing leaves on the
    /// way down and canonicalizing on the way back up.
    ///
    /// Returns the path of the leaf that holds `value` afterwards, which is shorter than `depth`
    /// when ancestors merged.
    pub fn set(&mut self, x: u64, y: u64, depth: usize, value: V) -> Path
    where
        V: Clone + PartialEq,
    {
        let path = Path::from_position(Pos::new(x, y), depth);
        self.set_at(&path, value)
    }
    /// [`QuadTree::set`] with coordinates given as [`morton_code`](crate::morton_code)s
    pub fn set_by_morton(&mut self, x_code: u64, y_code: u64, depth: usize, value: V) -> Path
    where
        V: Clone + PartialEq,
    {
        let unit = u32::try_from(depth).unwrap_or(u32::MAX);
        self.set(
            position_from_morton(x_code, unit),
            position_from_morton(y_code, unit),
            depth,
            value,
        )
    }
    pub fn set_at(&mut self, path: &[Quadrant], value: V) -> Path
    where
        V: Clone + PartialEq,
    {
        let held = self.set_in(path, value);
        path[..held].iter().copied().collect()
    }
    /// depth below `self` of the leaf holding `value` once done
    fn set_in(&mut self, path: &[Quadrant], value: V) -> usize
    where
        V: Clone + PartialEq,
    {
        match path.split_first() {
            None => {
                self.combine(Some(value));
                0
            }
            Some((&q, rest)) => {
                let held = self.expand()[q].set_in(rest, value);
                if self.simplify() {
                    0
                } else {
                    held + 1
                }
            }
        }
    }

    /// divides a leaf if needed and hands out its children
    pub(crate) fn expand(&mut self) -> &mut Quad<Self>
    where
        V: Clone,
    {
        self.divide();
        match self {
            Self::Divided(_, children) => children,
            Self::Leaf(_) => unreachable!("divided above"),
        }
    }
    /// children as they would be after [`QuadTree::divide`], without dividing
    pub(crate) fn quadrants(&self) -> Quad<&Self> {
        match self {
            Self::Leaf(_) => Quad::splat(self),
            Self::Divided(_, children) => Quad::as_ref(children),
        }
    }
}
