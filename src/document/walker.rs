//! Lazy document-order traversal of a node tree.

use super::node::{Document, Node};

/// Depth-first, pre-order iterator over the nodes of a document that satisfy a
/// predicate.
///
/// Containers are descended into whether or not they match. The tree is never
/// mutated, so walking the same document twice yields the same sequence.
pub struct NodeWalker<'a, P> {
    // One iterator per open container; avoids recursion on deep trees
    stack: Vec<std::slice::Iter<'a, Node>>,
    predicate: P,
}

impl<'a, P> NodeWalker<'a, P>
where
    P: FnMut(&Node) -> bool,
{
    pub fn new(nodes: &'a [Node], predicate: P) -> Self {
        Self {
            stack: vec![nodes.iter()],
            predicate,
        }
    }
}

impl<'a, P> Iterator for NodeWalker<'a, P>
where
    P: FnMut(&Node) -> bool,
{
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(node) = self.stack.last_mut()?.next() else {
                self.stack.pop();
                continue;
            };

            let children = node.children();
            if !children.is_empty() {
                self.stack.push(children.iter());
            }

            if (self.predicate)(node) {
                return Some(node);
            }
        }
    }
}

/// Walks `document` in document order, yielding nodes for which `predicate` holds.
pub fn walk<P>(document: &Document, predicate: P) -> NodeWalker<'_, P>
where
    P: FnMut(&Node) -> bool,
{
    NodeWalker::new(&document.nodes, predicate)
}

/// Titles and paragraphs are the only nodes that produce search records.
pub const fn is_indexable(node: &Node) -> bool {
    matches!(node, Node::Title { .. } | Node::Paragraph { .. })
}
