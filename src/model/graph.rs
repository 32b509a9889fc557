use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat node + edge graph as delivered by the analysis backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Edge>,
}

/// Node identifier.
///
/// The backend emits either strings (file paths) or numbers. Numbers are kept
/// in their decimal text form so `1` and `"1"` address the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for NodeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => NodeId(s),
            RawId::Number(n) => NodeId(number_key(&n)),
        })
    }
}

/// Integral floats print without a fraction, so `1.0` and `1` share a key.
fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Node category; drives colouring and CSS classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    File,
    Directory,
    Package,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::Package => "package",
            NodeKind::Other(s) => s,
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "file" => NodeKind::File,
            "directory" => NodeKind::Directory,
            "package" => NodeKind::Package,
            _ => NodeKind::Other(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
            url: None,
            info: None,
            size: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

/// One end of an edge.
///
/// Force layouts rewrite endpoints in place from ids to node objects once the
/// simulation starts, so both forms arrive here. Anything else (an object
/// without `id`, `null`, ...) is kept as `Unresolved` and never matches a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Id(NodeId),
    Ref { id: NodeId },
    Unresolved(serde_json::Value),
}

impl Endpoint {
    pub fn id(&self) -> Option<&NodeId> {
        match self {
            Endpoint::Id(id) | Endpoint::Ref { id } => Some(id),
            Endpoint::Unresolved(_) => None,
        }
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Endpoint::Id(NodeId::from(s))
    }
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Endpoint::Id(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: Endpoint,
    pub target: Endpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Edge {
    pub fn new(source: impl Into<Endpoint>, target: impl Into<Endpoint>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value: None,
        }
    }
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<Edge>) -> Self {
        Self { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_unify() {
        let a: NodeId = serde_json::from_str("1").unwrap();
        let b: NodeId = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_integral_float_ids_match_integers() {
        let ids: Vec<NodeId> = serde_json::from_str("[1.0, 1, -0.0, 2.5]").unwrap();
        assert_eq!(ids[0], NodeId::from("1"));
        assert_eq!(ids[1], NodeId::from("1"));
        assert_eq!(ids[2], NodeId::from("0"));
        assert_eq!(ids[3], NodeId::from("2.5"));
    }

    #[test]
    fn test_endpoint_forms() {
        let edge: Edge = serde_json::from_str(
            r#"{"source": {"id": "src", "x": 10.5, "index": 0}, "target": "src/a.js"}"#,
        )
        .unwrap();
        assert_eq!(edge.source.id(), Some(&NodeId::from("src")));
        assert_eq!(edge.target.id(), Some(&NodeId::from("src/a.js")));
        assert_eq!(edge.value, None);
    }

    #[test]
    fn test_endpoint_without_id_is_unresolved() {
        let edge: Edge =
            serde_json::from_str(r#"{"source": {"x": 1}, "target": null, "value": 2}"#).unwrap();
        assert!(edge.source.id().is_none());
        assert!(edge.target.id().is_none());
        assert_eq!(edge.value, Some(2.0));
    }

    #[test]
    fn test_node_kind_roundtrip_keeps_unknown_types() {
        let node: Node =
            serde_json::from_str(r#"{"id": "x", "name": "x", "type": "symlink"}"#).unwrap();
        assert_eq!(node.kind, Some(NodeKind::Other("symlink".to_string())));

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "symlink");
        assert!(json.get("size").is_none());
    }

    #[test]
    fn test_graph_tolerates_missing_sections() {
        let graph: Graph = serde_json::from_str("{}").unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
    }
}
