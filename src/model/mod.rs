mod graph;
mod quality;
mod repo;

pub use graph::{Edge, Endpoint, Graph, Node, NodeId, NodeKind};
pub use quality::{CodeQuality, ComplexityEntry, LanguageShare};
pub use repo::{FileEntry, FileKind, RepoInfo, format_date};

use serde::{Deserialize, Serialize};

/// Everything the backend returns for one `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub repo_info: RepoInfo,
    #[serde(default)]
    pub file_structure: FileEntry,
    #[serde(default)]
    pub dependency_data: Graph,
    #[serde(default)]
    pub code_quality: CodeQuality,
    #[serde(default)]
    pub mermaid_chart: String,
}

impl AnalysisResponse {
    /// Mermaid source ready for rendering: the backend's chart without any
    /// Markdown fence, or a chart generated from the file tree when the
    /// backend sent none.
    pub fn mermaid(&self) -> String {
        let chart = crate::render::strip_code_fence(&self.mermaid_chart);
        if chart.is_empty() {
            crate::render::fallback_flowchart(&self.file_structure)
        } else {
            chart
        }
    }
}

/// Input accepted wherever a graph is expected: a full analysis response or
/// a bare `{nodes, links}` document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GraphSource {
    Analysis(Box<AnalysisResponse>),
    Graph(Graph),
}

impl GraphSource {
    pub fn into_graph(self) -> Graph {
        match self {
            GraphSource::Analysis(analysis) => analysis.dependency_data,
            GraphSource::Graph(graph) => graph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "repoInfo": {"name": "demo", "stars": 3, "created_at": "2020-01-02T03:04:05"},
        "fileStructure": {"name": "demo", "type": "dir", "path": "", "children": [
            {"name": "app.py", "path": "app.py", "type": "file", "children": []}
        ]},
        "dependencyData": {
            "nodes": [{"id": "demo", "name": "demo", "type": "directory", "size": 11},
                      {"id": "app.py", "name": "app.py", "type": "file", "size": 5}],
            "links": [{"source": "demo", "target": "app.py", "value": 1}]
        },
        "codeQuality": {
            "languageDistribution": [{"language": "Python", "percentage": 100.0}],
            "complexity": [{"file": "app.py", "complexity": 12, "lines": 300}]
        },
        "mermaidChart": "```mermaid\nflowchart TD\nnode1[\"demo\"]\n```"
    }"#;

    #[test]
    fn test_full_response_parses() {
        let analysis: AnalysisResponse = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(analysis.repo_info.name, "demo");
        assert_eq!(analysis.repo_info.stars, 3);
        assert_eq!(analysis.dependency_data.nodes.len(), 2);
        assert_eq!(analysis.code_quality.complexity[0].complexity, 12.0);
        assert_eq!(analysis.mermaid(), "flowchart TD\nnode1[\"demo\"]");
    }

    #[test]
    fn test_missing_mermaid_falls_back_to_file_tree() {
        let analysis: AnalysisResponse =
            serde_json::from_str(r#"{"repoInfo": {"name": "demo"}, "fileStructure": {"name": "demo", "type": "dir"}}"#)
                .unwrap();
        assert!(analysis.mermaid().starts_with("flowchart TD"));
    }

    #[test]
    fn test_graph_source_accepts_both_shapes() {
        let from_analysis: GraphSource = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(from_analysis.into_graph().links.len(), 1);

        let bare: GraphSource =
            serde_json::from_str(r#"{"nodes": [{"id": 1, "name": "src"}], "links": []}"#).unwrap();
        assert_eq!(bare.into_graph().nodes[0].id, NodeId::from("1"));
    }
}
