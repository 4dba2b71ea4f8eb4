use crate::Quad;

/// A canonical, maximally merged partition of a square grid.
///
/// A leaf holds one value for its whole region. A divided node owns exactly 4 children, one per
/// [`Quadrant`](crate::Quadrant). Mutating operations keep the tree canonical: no divided node
/// ever has 4 leaf children holding an equal value.
///
/// The value slot of a divided node carries no meaning. It is whatever the node held when it
/// was divided (or what was deserialized), round trips verbatim, and is what [`QuadTree::combine`]
/// falls back to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum QuadTree<V> {
    Leaf(V),
    Divided(V, Box<Quad<QuadTree<V>>>),
}

/// A tree shaped patch.
///
/// A `None` leaf leaves its region untouched, a `Some` leaf overwrites its whole region, and a
/// divided node recurses into its children. A divided node with a `Some` slot overwrites first
/// and then recurses, see [`QuadTree::apply`].
pub type Delta<V> = QuadTree<Option<V>>;

impl<V> QuadTree<V> {
    pub const fn new(value: V) -> Self {
        Self::Leaf(value)
    }
    pub fn new_divided(value: V, children: Quad<QuadTree<V>>) -> Self {
        Self::Divided(value, Box::new(children))
    }

    pub fn value(&self) -> &V {
        match self {
            Self::Leaf(value) | Self::Divided(value, _) => value,
        }
    }
    pub fn set_value(&mut self, value: V) {
        match self {
            Self::Leaf(slot) | Self::Divided(slot, _) => *slot = value,
        }
    }
    pub fn is_divided(&self) -> bool {
        matches!(self, Self::Divided(_, _))
    }
    pub fn children(&self) -> Option<&Quad<QuadTree<V>>> {
        match self {
            Self::Leaf(_) => None,
            Self::Divided(_, children) => Some(children),
        }
    }
    pub fn children_mut(&mut self) -> Option<&mut Quad<QuadTree<V>>> {
        match self {
            Self::Leaf(_) => None,
            Self::Divided(_, children) => Some(children),
        }
    }

    /// Expands a leaf into 4 leaves carrying its value.
    ///
    /// Already divided nodes are left as they are.
    pub fn divide(&mut self)
    where
        V: Clone,
    {
        if let Self::Leaf(value) = self {
            *self = Self::new_divided(value.clone(), Quad::splat(Self::Leaf(value.clone())));
        }
    }
    /// Discards any children. Without a `value` the node keeps its current slot value.
    pub fn combine(&mut self, value: Option<V>)
    where
        V: Clone,
    {
        let value = value.unwrap_or_else(|| self.value().clone());
        *self = Self::Leaf(value);
    }

    /// 0 for a leaf, otherwise 1 + the deepest child
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Divided(_, children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
    /// number of nodes, leaves and divided nodes alike
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Divided(_, children) => 1 + children.iter().map(Self::size).sum::<usize>(),
        }
    }

    /// same shape, every value (slots included) passed through `f`
    pub fn map<U>(&self, f: &mut impl FnMut(&V) -> U) -> QuadTree<U> {
        match self {
            Self::Leaf(value) => QuadTree::Leaf(f(value)),
            Self::Divided(value, children) => {
                let value = f(value);
                let children = Quad::as_ref(children).map(|child| child.map(&mut *f));
                QuadTree::new_divided(value, children)
            }
        }
    }
}
impl<V: Default> Default for QuadTree<V> {
    fn default() -> Self {
        Self::Leaf(V::default())
    }
}
impl<V> From<Quad<QuadTree<V>>> for QuadTree<V>
where
    V: Clone,
{
    /// divided node whose slot is copied from the north-west child
    fn from(children: Quad<QuadTree<V>>) -> Self {
        Self::new_divided(children.nw.value().clone(), children)
    }
}

impl<V> QuadTree<Option<V>> {
    /// a delta that changes nothing
    pub const fn noop() -> Self {
        Self::Leaf(None)
    }
    /// a delta that overwrites the whole region with `value`
    pub const fn overwrite(value: V) -> Self {
        Self::Leaf(Some(value))
    }
}
