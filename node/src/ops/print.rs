use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{Delta, Path, QuadTree, Quadrant};

// one node per line, `value (x, y)` with the node's own position at its depth:
// === Tree ===
// 0 (0, 0)
// - 1 (0, 0)
//   - 5 (0, 0)
impl<V: Display> Display for QuadTree<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "=== Tree ===")?;
        write_node(f, self, &mut Path::root(), &mut |f, value| write!(f, "{value}"))
    }
}

impl<V: Display> Delta<V> {
    /// like the [`Display`] of a tree, with no-op slots shown as `-`
    pub fn display_delta(&self) -> DisplayDelta<'_, V> {
        DisplayDelta(self)
    }
}
pub struct DisplayDelta<'t, V>(&'t Delta<V>);
impl<V: Display> Display for DisplayDelta<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "=== Delta ===")?;
        write_node(f, self.0, &mut Path::root(), &mut |f, value| match value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "-"),
        })
    }
}

fn write_node<V>(
    f: &mut Formatter<'_>,
    node: &QuadTree<V>,
    path: &mut Path,
    write_value: &mut impl FnMut(&mut Formatter<'_>, &V) -> FmtResult,
) -> FmtResult {
    if let Some(indent) = path.depth().checked_sub(1) {
        write!(f, "{:width$}- ", "", width = indent * 2)?;
    }
    write_value(f, node.value())?;
    let pos = path.position();
    writeln!(f, " ({}, {})", pos.x, pos.y)?;
    if let Some(children) = node.children() {
        for q in Quadrant::iter_all() {
            path.push(q);
            write_node(f, &children[q], path, write_value)?;
            path.pop();
        }
    }
    Ok(())
}
