//! lookup by node identity rather than by value

use crate::{Error, Missing, Path, QuadTree, Quadrant, Result};

impl<V> QuadTree<V> {
    /// Path from `self` to the node living at the same address as `target`.
    ///
    /// Compares by identity (`std::ptr::eq`), so an equal valued node elsewhere does not match.
    /// Visits every node in the worst case; prefer the [`Path`] returned by
    /// [`QuadTree::set`] where one is available.
    pub fn identity_path(&self, target: &Self) -> Result<Path> {
        let mut path = Path::root();
        if self.find_identity(target, &mut path) {
            Ok(path)
        } else {
            Err(Error::NotFound(Missing::Node))
        }
    }
    fn find_identity(&self, target: &Self, path: &mut Path) -> bool {
        if std::ptr::eq(self, target) {
            return true;
        }
        let Some(children) = self.children() else {
            return false;
        };
        for q in Quadrant::iter_all() {
            path.push(q);
            if children[q].find_identity(target, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}
