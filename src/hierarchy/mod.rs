//! Graph → rooted hierarchy conversion for the radial-tree and circle-packing
//! layouts.
//!
//! The hierarchy is stored as an arena. Every graph node occupies exactly one
//! slot; an edge `source → target` appends the target's slot to the source's
//! child list. A node targeted by several edges is therefore the *same* slot
//! under each parent, and a node whose only parents form a cycle is never
//! reachable from the synthetic root.

mod report;

pub use report::HierarchyReport;

use crate::model::{Graph, NodeId, NodeKind};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Name given to the synthetic root.
pub const ROOT_NAME: &str = "root";

/// Size used when a node carries none.
pub const DEFAULT_SIZE: f64 = 1.0;

/// Deepest level (below the synthetic root) an expansion descends to.
pub const MAX_EXPANSION_DEPTH: usize = 256;

/// Position of a node in the hierarchy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(usize);

impl Slot {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Display fields copied from a graph node, plus its child slots.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub name: String,
    pub kind: Option<NodeKind>,
    pub url: Option<String>,
    pub info: Option<String>,
    pub size: f64,
    children: Vec<Slot>,
}

impl HierarchyNode {
    pub fn children(&self) -> &[Slot] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

struct Frame<T> {
    slot: Option<Slot>,
    next: usize,
    folded: Vec<T>,
}

impl<T> Frame<T> {
    fn new(slot: Option<Slot>) -> Self {
        Self {
            slot,
            next: 0,
            folded: Vec::new(),
        }
    }
}

/// A rooted hierarchy built from a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    roots: Vec<Slot>,
}

/// Build the hierarchy for `graph`.
///
/// Root children are the nodes without an incoming edge, in node order. Every
/// other node hangs under each node that has an edge into it. Edges with an
/// endpoint that does not resolve to a node are dropped; an edge's target
/// still counts as "has an incoming edge" even when its source is dangling.
/// Never fails.
pub fn build_hierarchy(graph: &Graph) -> Hierarchy {
    let mut slots: HashMap<&NodeId, Slot> = HashMap::with_capacity(graph.nodes.len());
    let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(graph.nodes.len());

    for node in &graph.nodes {
        let entry = HierarchyNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind.clone(),
            url: node.url.clone(),
            info: node.info.clone(),
            size: node.size.unwrap_or(DEFAULT_SIZE),
            children: Vec::new(),
        };

        match slots.get(&node.id).copied() {
            // Later definitions of an id replace the display fields. The id
            // keeps its first slot, so it is listed under the root once, not
            // once per definition.
            Some(slot) => nodes[slot.0] = entry,
            None => {
                slots.insert(&node.id, Slot(nodes.len()));
                nodes.push(entry);
            }
        }
    }

    let mut has_incoming: HashSet<&NodeId> = HashSet::new();
    let mut dropped = 0usize;

    for link in &graph.links {
        let target_id = link.target.id();
        if let Some(id) = target_id {
            has_incoming.insert(id);
        }

        let source = link.source.id().and_then(|id| slots.get(id));
        let target = target_id.and_then(|id| slots.get(id));
        match (source, target) {
            (Some(source), Some(target)) => nodes[source.0].children.push(*target),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "ignored edges with unknown endpoints");
    }

    let roots = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !has_incoming.contains(&node.id))
        .map(|(idx, _)| Slot(idx))
        .collect();

    Hierarchy { nodes, roots }
}

impl Hierarchy {
    /// Children of the synthetic root.
    pub fn roots(&self) -> &[Slot] {
        &self.roots
    }

    pub fn node(&self, slot: Slot) -> &HierarchyNode {
        &self.nodes[slot.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (Slot, &HierarchyNode)> {
        self.nodes.iter().enumerate().map(|(idx, n)| (Slot(idx), n))
    }

    /// Number of distinct graph nodes held (reachable or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn slot_of(&self, id: &NodeId) -> Option<Slot> {
        self.nodes.iter().position(|n| &n.id == id).map(Slot)
    }

    /// Children of `slot`, or of the synthetic root when `slot` is `None`.
    pub fn children_of(&self, slot: Option<Slot>) -> &[Slot] {
        match slot {
            Some(slot) => &self.nodes[slot.0].children,
            None => &self.roots,
        }
    }

    /// Depth-first fold from the synthetic root.
    ///
    /// `f` receives the node being folded (`None` for the root) and the
    /// already-folded children. A child that already sits on the current
    /// ancestor path is skipped, so a cycle reachable from the root ends the
    /// descent instead of recursing forever. Shared nodes are folded once
    /// per parent. Nodes at [`MAX_EXPANSION_DEPTH`] are folded as leaves;
    /// [`Hierarchy::depth_limited`] lists them.
    pub fn fold<T, F>(&self, mut f: F) -> T
    where
        F: FnMut(Option<&HierarchyNode>, Vec<T>) -> T,
    {
        self.walk(&mut f, &mut |_: Slot| {})
    }

    /// Nodes whose children were left out of the expansion by the depth limit.
    pub fn depth_limited(&self) -> Vec<Slot> {
        let mut cut = Vec::new();
        self.walk(
            &mut |_: Option<&HierarchyNode>, _: Vec<()>| (),
            &mut |slot: Slot| cut.push(slot),
        );
        cut.sort();
        cut.dedup();
        cut
    }

    /// Iterative post-order walk; `ancestors` holds the frames above `current`.
    fn walk<T, F, C>(&self, f: &mut F, on_cut: &mut C) -> T
    where
        F: FnMut(Option<&HierarchyNode>, Vec<T>) -> T,
        C: FnMut(Slot),
    {
        let mut on_path = vec![false; self.nodes.len()];
        let mut ancestors: Vec<Frame<T>> = Vec::new();
        let mut current = Frame::new(None);

        loop {
            let children = self.children_of(current.slot);

            if ancestors.len() == MAX_EXPANSION_DEPTH && current.next == 0 {
                if let Some(slot) = current.slot {
                    if children.iter().any(|c| !on_path[c.0]) {
                        on_cut(slot);
                    }
                }
                current.next = children.len();
            }

            if let Some(&child) = children.get(current.next) {
                current.next += 1;
                if !on_path[child.0] {
                    on_path[child.0] = true;
                    ancestors.push(std::mem::replace(&mut current, Frame::new(Some(child))));
                }
                continue;
            }

            let slot = current.slot;
            let value = f(slot.map(|s| self.node(s)), current.folded);
            if let Some(slot) = slot {
                on_path[slot.0] = false;
            }
            match ancestors.pop() {
                Some(parent) => {
                    current = parent;
                    current.folded.push(value);
                }
                None => return value,
            }
        }
    }

    /// Expand into a nested tree, the shape d3.hierarchy consumes.
    pub fn to_tree(&self) -> HierarchyTree {
        self.fold(|node, children| match node {
            Some(n) => HierarchyTree {
                name: n.name.clone(),
                kind: n.kind.clone(),
                url: n.url.clone(),
                info: n.info.clone(),
                size: Some(n.size),
                children,
            },
            None => HierarchyTree {
                name: ROOT_NAME.to_string(),
                kind: None,
                url: None,
                info: None,
                size: None,
                children,
            },
        })
    }
}

/// Nested, owned view of a [`Hierarchy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyTree {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub children: Vec<HierarchyTree>,
}

impl HierarchyTree {
    /// Number of entries below this one, counting shared nodes once per parent.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }
}
