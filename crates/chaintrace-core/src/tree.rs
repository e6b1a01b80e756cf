//! Optional call-tree reconstruction over a flat, depth-tagged call list.
//!
//! Resolvers only ever emit the flat sequence. Consumers that want nesting
//! rebuild it here from depth transitions: each record becomes a child of
//! the closest preceding record with a strictly smaller depth.

use crate::types::CallRecord;
use serde::Serialize;

/// A call together with the calls it made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallNode<'a> {
    pub record: &'a CallRecord,
    pub children: Vec<CallNode<'a>>,
}

impl<'a> CallNode<'a> {
    /// Number of nodes in this subtree, self included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CallNode::size).sum::<usize>()
    }
}

/// Build a forest from `records`, preserving source order among siblings.
///
/// Depth jumps larger than one attach to the nearest shallower ancestor;
/// a record with no shallower predecessor becomes a root.
///
/// Only depths are consulted. When a resolver dropped a frame, the calls it
/// made have no record to nest under and are attached to the nearest earlier
/// record one level up, typically a sibling of the dropped frame.
pub fn build_call_tree(records: &[CallRecord]) -> Vec<CallNode<'_>> {
    let mut roots: Vec<CallNode<'_>> = Vec::new();
    // Open ancestors, shallowest first.
    let mut stack: Vec<CallNode<'_>> = Vec::new();

    for record in records {
        while stack.last().is_some_and(|open| open.record.depth >= record.depth) {
            close_top(&mut stack, &mut roots);
        }
        stack.push(CallNode { record, children: Vec::new() });
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    roots
}

fn close_top<'a>(stack: &mut Vec<CallNode<'a>>, roots: &mut Vec<CallNode<'a>>) {
    if let Some(done) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

/// Render a forest as indented text, two spaces per level.
pub fn render_tree(roots: &[CallNode<'_>]) -> String {
    fn walk(node: &CallNode<'_>, level: usize, out: &mut String) {
        out.push_str(&"  ".repeat(level));
        out.push_str(&format!(
            "{} {} [{}]\n",
            node.record.full_signature, node.record.selector, node.record.call_type
        ));
        for child in &node.children {
            walk(child, level + 1, out);
        }
    }

    let mut out = String::new();
    for root in roots {
        walk(root, 0, &mut out);
    }
    out
}
