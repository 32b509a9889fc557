use super::{Hierarchy, MAX_EXPANSION_DEPTH, Slot};
use crate::model::NodeId;
use petgraph::Direction;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;
use std::collections::HashSet;

/// Structural findings about a built hierarchy.
///
/// The builder keeps multi-parent nodes shared and lets cycle members fall
/// out of the tree. This report makes both visible without changing the
/// hierarchy itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HierarchyReport {
    /// Nodes attached under more than one parent edge.
    pub shared: Vec<NodeId>,
    /// Nodes that cannot be reached from the synthetic root.
    pub unreachable: Vec<NodeId>,
    /// Each entry is one cycle (strongly connected component).
    pub cycles: Vec<Vec<NodeId>>,
    /// Nodes whose children fall below the expansion depth limit.
    pub depth_limited: Vec<NodeId>,
}

impl HierarchyReport {
    pub fn from_hierarchy(hierarchy: &Hierarchy) -> Self {
        // Index 0 is the synthetic root; slot i lives at index i + 1.
        let mut graph: DiGraph<Option<Slot>, ()> = DiGraph::new();
        let root = graph.add_node(None);
        let indices: Vec<NodeIndex> = hierarchy
            .nodes()
            .map(|(slot, _)| graph.add_node(Some(slot)))
            .collect();

        for &slot in hierarchy.roots() {
            graph.add_edge(root, indices[slot.index()], ());
        }
        for (slot, node) in hierarchy.nodes() {
            for child in node.children() {
                graph.add_edge(indices[slot.index()], indices[child.index()], ());
            }
        }

        let id_of = |idx: NodeIndex| -> Option<NodeId> {
            graph[idx].map(|slot| hierarchy.node(slot).id.clone())
        };

        let shared = indices
            .iter()
            .filter(|idx| {
                graph
                    .edges_directed(**idx, Direction::Incoming)
                    .count()
                    > 1
            })
            .filter_map(|idx| id_of(*idx))
            .collect();

        let mut reachable = HashSet::new();
        let mut dfs = Dfs::new(&graph, root);
        while let Some(idx) = dfs.next(&graph) {
            reachable.insert(idx);
        }
        let unreachable = indices
            .iter()
            .filter(|idx| !reachable.contains(*idx))
            .filter_map(|idx| id_of(*idx))
            .collect();

        let mut cycles: Vec<Vec<NodeId>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || graph.contains_edge(scc[0], scc[0])
            })
            .map(|scc| {
                let mut members: Vec<NodeId> = scc.into_iter().filter_map(id_of).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();

        let depth_limited = hierarchy
            .depth_limited()
            .into_iter()
            .map(|slot| hierarchy.node(slot).id.clone())
            .collect();

        Self {
            shared,
            unreachable,
            cycles,
            depth_limited,
        }
    }

    /// True when every node appears exactly once under the root.
    pub fn is_strict_tree(&self) -> bool {
        self.shared.is_empty()
            && self.unreachable.is_empty()
            && self.cycles.is_empty()
            && self.depth_limited.is_empty()
    }

    /// Human-readable summary lines, one per finding group.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.shared.is_empty() {
            lines.push(format!(
                "{} node(s) appear under several parents: {}",
                self.shared.len(),
                join_ids(&self.shared)
            ));
        }
        if !self.unreachable.is_empty() {
            lines.push(format!(
                "{} node(s) are unreachable from the root: {}",
                self.unreachable.len(),
                join_ids(&self.unreachable)
            ));
        }
        for cycle in &self.cycles {
            lines.push(format!("cycle: {}", join_ids(cycle)));
        }
        if !self.depth_limited.is_empty() {
            lines.push(format!(
                "children cut at depth {}: {}",
                MAX_EXPANSION_DEPTH,
                join_ids(&self.depth_limited)
            ));
        }
        lines
    }
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy;
    use crate::model::{Edge, Graph, Node};

    fn report(nodes: &[&str], links: &[(&str, &str)]) -> HierarchyReport {
        let graph = Graph::new(
            nodes.iter().map(|id| Node::new(*id, *id)).collect(),
            links.iter().map(|(s, t)| Edge::new(*s, *t)).collect(),
        );
        HierarchyReport::from_hierarchy(&build_hierarchy(&graph))
    }

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|n| NodeId::from(*n)).collect()
    }

    #[test]
    fn test_strict_tree_has_no_findings() {
        let r = report(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
        assert!(r.is_strict_tree());
        assert!(r.summary_lines().is_empty());
    }

    #[test]
    fn test_reports_shared_nodes() {
        let r = report(&["a", "b", "s"], &[("a", "s"), ("b", "s")]);
        assert_eq!(r.shared, ids(&["s"]));
        assert!(r.unreachable.is_empty());
        assert!(!r.is_strict_tree());
    }

    #[test]
    fn test_reports_isolated_cycle_as_unreachable() {
        let r = report(&["a", "b", "c"], &[("a", "b"), ("b", "a")]);
        assert_eq!(r.unreachable, ids(&["a", "b"]));
        assert_eq!(r.cycles, vec![ids(&["a", "b"])]);
    }

    #[test]
    fn test_reachable_cycle_is_reported_but_reachable() {
        let r = report(&["top", "b", "c"], &[("top", "b"), ("b", "c"), ("c", "b")]);
        assert!(r.unreachable.is_empty());
        assert_eq!(r.cycles, vec![ids(&["b", "c"])]);
        // b has two parents: top and c.
        assert_eq!(r.shared, ids(&["b"]));
    }

    #[test]
    fn test_self_loop_counts_as_cycle() {
        let r = report(&["a"], &[("a", "a")]);
        assert_eq!(r.cycles, vec![ids(&["a"])]);
        assert_eq!(r.unreachable, ids(&["a"]));
    }

    #[test]
    fn test_deep_chain_reports_depth_cut() {
        let len = 100_000u64;
        let graph = Graph::new(
            (0..len).map(|i| Node::new(i, i.to_string())).collect(),
            (1..len)
                .map(|i| Edge::new(NodeId::from(i - 1), NodeId::from(i)))
                .collect(),
        );
        let r = HierarchyReport::from_hierarchy(&build_hierarchy(&graph));

        assert!(r.unreachable.is_empty());
        assert!(r.cycles.is_empty());
        assert_eq!(r.depth_limited, ids(&["255"]));
        assert!(!r.is_strict_tree());
        assert_eq!(r.summary_lines(), vec!["children cut at depth 256: 255"]);
    }
}
