//! Merging deltas into snapshots and computing the deltas that undo them.

use crate::{Delta, QuadTree};

impl<V> QuadTree<V>
where
    V: Clone + PartialEq,
{
    /// New snapshot with `delta` merged in. `self` is left untouched.
    ///
    /// A `Some` slot on `delta` replaces the whole region, dropping any structure below it. If
    /// `delta` is divided, each child delta is then applied to the matching quadrant (a leaf is
    /// divided first) and the result is canonicalized.
    pub fn apply(&self, delta: &Delta<V>) -> Self {
        let overwritten;
        let base = match delta.value() {
            Some(value) => {
                overwritten = Self::Leaf(value.clone());
                &overwritten
            }
            None => self,
        };
        match delta.children() {
            None => base.clone(),
            Some(deltas) => {
                let children = base.quadrants().zip_map(deltas.as_ref(), Self::apply);
                let mut result = Self::new_divided(base.value().clone(), children);
                result.simplify();
                result
            }
        }
    }

    /// The delta that restores `self` once `delta` has been applied to it.
    ///
    /// Wherever `delta` overwrites, the undo carries a full copy of the current subtree. Where
    /// it is a no-op, so is the undo. Leaves of `self` are paired against divided deltas as if
    /// they had been divided, without touching `self`.
    ///
    /// `self.apply(&self.trace(delta))` is identical to `self`.
    pub fn trace(&self, delta: &Delta<V>) -> Delta<V> {
        if delta.value().is_some() {
            return self.map(&mut |value| Some(value.clone()));
        }
        match delta.children() {
            None => Delta::noop(),
            Some(deltas) => {
                let children = self.quadrants().zip_map(deltas.as_ref(), Self::trace);
                let mut undo = Delta::new_divided(None, children);
                undo.simplify();
                undo
            }
        }
    }
}
