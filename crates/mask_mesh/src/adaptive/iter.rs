//! Depth-first traversal and the indented text dump built on it.

use std::fmt;

use super::{AdaptiveNode, AdaptiveQuadTree};

/// Pre-order iterator: a node, then its children in quadrant order.
pub struct Iter<'a> {
  stack: Vec<&'a AdaptiveNode>,
}

impl<'a> Iter<'a> {
  pub(super) fn new(root: &'a AdaptiveNode) -> Self {
    Self { stack: vec![root] }
  }
}

impl<'a> Iterator for Iter<'a> {
  type Item = &'a AdaptiveNode;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.stack.pop()?;
    if let Some(children) = node.children() {
      self.stack.extend(children.iter().rev());
    }
    Some(node)
  }
}

/// One line per node, indented two spaces per depth level.
///
/// ```text
/// [node x=0 y=0 size=4 value=0 depth=0 quadrant=- node_height=1 tree_height=1 cells_per_side=2 leaf=false]
///   [node x=0 y=0 size=2 value=1 depth=1 quadrant=LL node_height=0 tree_height=1 cells_per_side=1 leaf=true]
/// ```
impl fmt::Display for AdaptiveQuadTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for node in self.iter() {
      let quadrant = match node.quadrant() {
        Some(q) => q.short_name(),
        None => "-",
      };
      writeln!(
        f,
        "{:indent$}[node x={} y={} size={} value={} depth={} quadrant={} node_height={} tree_height={} cells_per_side={} leaf={}]",
        "",
        node.x(),
        node.y(),
        node.size(),
        node.value(),
        node.depth(),
        quadrant,
        node.node_height(),
        self.tree_height(),
        self.cells_per_side(node),
        node.is_leaf(),
        indent = node.depth() as usize * 2,
      )?;
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
