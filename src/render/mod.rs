mod charts;
mod file_tree;
mod mermaid;
pub mod palette;
mod scene;

pub use charts::{Bar, BarChart, Charts, PieChart, PieSlice};
pub use file_tree::{explainable_files, render_file_tree, render_hierarchy};
pub use mermaid::{fallback_flowchart, strip_code_fence};
pub use scene::{
    DEFAULT_RADIUS, ForceLink, ForceNode, ForceParams, ForceScene, PackNode, PackScene, Scene,
    Tooltip, TreeNode, TreeScene, label_lines,
};

use crate::hierarchy::{HierarchyReport, build_hierarchy};
use crate::model::AnalysisResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The three dependency layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visualization {
    /// Force-directed node/link graph
    Force,
    /// Radial tree over the derived hierarchy
    Tree,
    /// Circle packing over the derived hierarchy
    Pack,
}

impl Visualization {
    pub const ALL: [Visualization; 3] = [Visualization::Force, Visualization::Tree, Visualization::Pack];

    pub fn as_str(self) -> &'static str {
        match self {
            Visualization::Force => "force",
            Visualization::Tree => "tree",
            Visualization::Pack => "pack",
        }
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVisualization(pub String);

impl fmt::Display for UnknownVisualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown visualization '{}' (expected force, tree or pack)", self.0)
    }
}

impl std::error::Error for UnknownVisualization {}

impl FromStr for Visualization {
    type Err = UnknownVisualization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Visualization::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVisualization(s.to_string()))
    }
}

/// Rendering state for one analysis session.
///
/// Built once per analysis response and passed to whatever renders it.
/// Every [`render`](Self::render) call rebuilds the scene from the immutable
/// analysis; only the choice of current layout is remembered.
#[derive(Debug, Clone)]
pub struct RenderContext {
    analysis: Arc<AnalysisResponse>,
    repo_url: Option<String>,
    current: Option<Visualization>,
}

impl RenderContext {
    pub fn new(analysis: AnalysisResponse) -> Self {
        Self {
            analysis: Arc::new(analysis),
            repo_url: None,
            current: None,
        }
    }

    /// Record the URL the analysis was requested for.
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    pub fn analysis(&self) -> &AnalysisResponse {
        &self.analysis
    }

    /// URL to send explain requests for: the requested URL, else the
    /// repository URL reported by the backend.
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url
            .as_deref()
            .or(self.analysis.repo_info.url.as_deref())
    }

    pub fn current(&self) -> Option<Visualization> {
        self.current
    }

    pub fn render(&mut self, kind: Visualization) -> Scene {
        self.current = Some(kind);
        self.scene(kind)
    }

    /// Build a scene without changing the current layout.
    pub fn scene(&self, kind: Visualization) -> Scene {
        Scene::build(kind, &self.analysis.dependency_data)
    }

    pub fn charts(&self) -> Charts {
        Charts::from_quality(&self.analysis.code_quality)
    }

    pub fn report(&self) -> HierarchyReport {
        HierarchyReport::from_hierarchy(&build_hierarchy(&self.analysis.dependency_data))
    }

    pub fn mermaid(&self) -> String {
        self.analysis.mermaid()
    }
}
