//! Coordinate-free scene descriptions for the three dependency layouts.
//!
//! A scene says *what* to draw (labels, colours, radii, tooltips, links); the
//! browser adapter hands it to the layout engine to decide *where*.

use super::Visualization;
use super::palette::node_color;
use crate::hierarchy::{HierarchyNode, build_hierarchy};
use crate::model::{Graph, Node, NodeId, NodeKind};
use serde::Serialize;
use std::collections::HashSet;

/// Radius for force-layout nodes without a positive size.
pub const DEFAULT_RADIUS: f64 = 5.0;

const TREE_BRANCH_FILL: &str = "#555";
const TREE_LEAF_FILL: &str = "#999";
const PACK_BRANCH_FILL: &str = "#fff";
const PACK_BRANCH_STROKE: &str = "#555";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scene {
    Force(ForceScene),
    Tree(TreeScene),
    Pack(PackScene),
}

impl Scene {
    /// Build a fresh scene; nothing is cached between calls.
    pub fn build(kind: Visualization, graph: &Graph) -> Self {
        match kind {
            Visualization::Force => Scene::Force(ForceScene::from_graph(graph)),
            Visualization::Tree => Scene::Tree(TreeScene::from_graph(graph)),
            Visualization::Pack => Scene::Pack(PackScene::from_graph(graph)),
        }
    }

    pub fn visualization(&self) -> Visualization {
        match self {
            Scene::Force(_) => Visualization::Force,
            Scene::Tree(_) => Visualization::Tree,
            Scene::Pack(_) => Visualization::Pack,
        }
    }
}

/// Tooltip content; the adapter decides markup and placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub subtitle: String,
    pub detail: String,
}

impl Tooltip {
    fn new(name: &str, kind: Option<&NodeKind>, info: Option<&str>) -> Self {
        Self {
            title: name.to_string(),
            subtitle: kind.map_or("file", NodeKind::as_str).to_string(),
            detail: info.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceParams {
    pub link_distance: f64,
    pub charge: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            link_distance: 100.0,
            charge: -300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceNode {
    pub id: NodeId,
    pub label: String,
    pub class: String,
    pub fill: &'static str,
    pub radius: f64,
    pub tooltip: Tooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceLink {
    pub source: NodeId,
    pub target: NodeId,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceScene {
    pub params: ForceParams,
    pub nodes: Vec<ForceNode>,
    pub links: Vec<ForceLink>,
}

impl ForceScene {
    /// Links whose endpoints are not both known nodes are left out; the
    /// simulation cannot place them.
    pub fn from_graph(graph: &Graph) -> Self {
        let known: HashSet<&NodeId> = graph.nodes.iter().map(|n| &n.id).collect();

        let nodes = graph.nodes.iter().map(force_node).collect();
        let links = graph
            .links
            .iter()
            .filter_map(|link| {
                let source = link.source.id().filter(|id| known.contains(id))?;
                let target = link.target.id().filter(|id| known.contains(id))?;
                Some(ForceLink {
                    source: source.clone(),
                    target: target.clone(),
                    width: link.value.unwrap_or(1.0).sqrt(),
                })
            })
            .collect();

        Self {
            params: ForceParams::default(),
            nodes,
            links,
        }
    }
}

fn force_node(node: &Node) -> ForceNode {
    let class = match &node.kind {
        Some(kind) => format!("node {}", kind),
        None => "node".to_string(),
    };
    ForceNode {
        id: node.id.clone(),
        label: node.name.clone(),
        class,
        fill: node_color(node.kind.as_ref()),
        radius: node.size.filter(|s| *s > 0.0).unwrap_or(DEFAULT_RADIUS),
        tooltip: Tooltip::new(&node.name, node.kind.as_ref(), node.info.as_deref()),
        url: node.url.clone(),
    }
}

/// Radial tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub fill: &'static str,
    pub tooltip: Tooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeScene {
    pub root: TreeNode,
}

impl TreeScene {
    pub fn from_graph(graph: &Graph) -> Self {
        let hierarchy = build_hierarchy(graph);
        let root = hierarchy.fold(|node, children: Vec<TreeNode>| {
            let fill = if children.is_empty() {
                TREE_LEAF_FILL
            } else {
                TREE_BRANCH_FILL
            };
            let (label, tooltip, url) = describe(node);
            TreeNode {
                label,
                fill,
                tooltip,
                url,
                children,
            }
        });
        Self { root }
    }
}

/// Circle-packing node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackNode {
    pub label: String,
    /// Area weight, passed through unvalidated.
    pub value: f64,
    pub fill: &'static str,
    pub fill_opacity: f64,
    pub stroke: &'static str,
    pub stroke_width: f64,
    /// Label split into lines for leaf circles.
    pub label_lines: Vec<String>,
    pub tooltip: Tooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub children: Vec<PackNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackScene {
    pub padding: f64,
    pub root: PackNode,
}

impl PackScene {
    pub fn from_graph(graph: &Graph) -> Self {
        let hierarchy = build_hierarchy(graph);
        let root = hierarchy.fold(|node, children: Vec<PackNode>| {
            let (label, tooltip, url) = describe(node);
            let value = node.map_or(1.0, |n| n.size);
            if children.is_empty() {
                let color = node_color(node.and_then(|n| n.kind.as_ref()));
                PackNode {
                    label_lines: label_lines(&label),
                    label,
                    value,
                    fill: color,
                    fill_opacity: 0.8,
                    stroke: color,
                    stroke_width: 0.0,
                    tooltip,
                    url,
                    children,
                }
            } else {
                PackNode {
                    label_lines: Vec::new(),
                    label,
                    value,
                    fill: PACK_BRANCH_FILL,
                    fill_opacity: 0.1,
                    stroke: PACK_BRANCH_STROKE,
                    stroke_width: 1.0,
                    tooltip,
                    url,
                    children,
                }
            }
        });
        Self { padding: 3.0, root }
    }
}

fn describe(node: Option<&HierarchyNode>) -> (String, Tooltip, Option<String>) {
    match node {
        Some(n) => (
            n.name.clone(),
            Tooltip::new(&n.name, n.kind.as_ref(), n.info.as_deref()),
            n.url.clone(),
        ),
        None => (
            crate::hierarchy::ROOT_NAME.to_string(),
            Tooltip::new(crate::hierarchy::ROOT_NAME, None, None),
            None,
        ),
    }
}

/// Split a label before each uppercase-then-lowercase pair and on whitespace,
/// e.g. `"HierarchyBuilder test"` → `["Hierarchy", "Builder", "test"]`.
pub fn label_lines(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            continue;
        }
        let starts_word = i > 0
            && c.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if starts_word && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
