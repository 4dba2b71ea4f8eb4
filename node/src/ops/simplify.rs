use itertools::Itertools;

use crate::{Quad, QuadTree, Quadrant};

impl<V> QuadTree<V>
where
    V: Clone + PartialEq,
{
    /// Collapses `self` into a leaf if its 4 children are leaves holding an equal value.
    ///
    /// Returns whether it collapsed.
    pub fn simplify(&mut self) -> bool {
        let merged = match &*self {
            Self::Leaf(_) => None,
            Self::Divided(_, children) => common_leaf_value(children).cloned(),
        };
        match merged {
            Some(value) => {
                *self = Self::Leaf(value);
                true
            }
            None => false,
        }
    }
    /// Simplifies every node on `path`, deepest first.
    ///
    /// Expects the tree to be canonical everywhere except along `path`.
    pub fn simplify_upward(&mut self, path: &[Quadrant]) {
        if let (Some((&q, rest)), Self::Divided(_, children)) = (path.split_first(), &mut *self) {
            children[q].simplify_upward(rest);
        }
        self.simplify();
    }
    /// Simplifies every node, children before parents, making any tree canonical.
    pub fn canonicalize(&mut self) {
        if let Self::Divided(_, children) = self {
            for q in Quadrant::iter_all() {
                children[q].canonicalize();
            }
        }
        self.simplify();
    }
    /// no divided node has 4 leaf children holding an equal value
    pub fn is_canonical(&self) -> bool {
        match self {
            Self::Leaf(_) => true,
            Self::Divided(_, children) => {
                common_leaf_value(children).is_none() && children.iter().all(Self::is_canonical)
            }
        }
    }
}

fn common_leaf_value<V: PartialEq>(children: &Quad<QuadTree<V>>) -> Option<&V> {
    let leaves: Option<Vec<&V>> = children
        .iter()
        .map(|child| match child {
            QuadTree::Leaf(value) => Some(value),
            QuadTree::Divided(_, _) => None,
        })
        .collect();
    leaves
        .filter(|values| values.iter().all_equal())
        .map(|values| values[0])
}

#[cfg(test)]
mod test {
    use crate::{Quad, QuadTree, Quadrant};

    #[test]
    fn collapses_equal_leaves_only() {
        let mut tree = QuadTree::new_divided(5, Quad::splat(QuadTree::new(1)));
        assert!(!tree.is_canonical());
        assert!(tree.simplify());
        assert_eq!(tree, QuadTree::new(1));
        assert!(!tree.simplify());

        let mut inner = QuadTree::new(1);
        inner.divide();
        let mut tree = QuadTree::from(Quad {
            nw: inner,
            ne: QuadTree::new(1),
            sw: QuadTree::new(1),
            se: QuadTree::new(1),
        });
        // a divided child blocks the merge even if its slot matches
        assert!(!tree.simplify());
        assert!(tree.is_divided());
    }

    #[test]
    fn canonicalize_merges_bottom_up() {
        let mut tree = QuadTree::<u64>::from_json_str("[0,[0],[0],[0],[0,[1],[0],[0],[0]]]").unwrap();
        let mut kept = tree.clone();
        kept.canonicalize();
        assert_eq!(kept, tree);
        tree = QuadTree::from_json_str("[5,[0],[0],[0],[0,[0],[0],[0],[0]]]").unwrap();
        assert!(!tree.is_canonical());
        tree.canonicalize();
        assert_eq!(tree, QuadTree::new(0));
    }

    #[test]
    fn upward_along_path() {
        let mut tree = QuadTree::new(0);
        tree.set(0, 0, 2, 1);
        // write behind the tree's back, then repair
        let nw = &mut tree.children_mut().unwrap().nw;
        nw.children_mut().unwrap().nw.set_value(0);
        assert!(!tree.is_canonical());
        tree.simplify_upward(&[Quadrant::NW, Quadrant::NW]);
        assert!(tree.is_canonical());
        assert_eq!(tree, QuadTree::new(0));
    }
}
