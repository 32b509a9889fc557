//! Local web viewer: an axum server around the embedded D3 page, and a
//! static exporter that bakes a session into a single HTML file.

mod assets;
mod export;
mod routes;

pub use export::export_html;
pub use routes::{AppState, router, serve};

use crate::hierarchy::HierarchyReport;
use crate::model::AnalysisResponse;
use crate::render::{Charts, RenderContext, Scene, Visualization};
use serde::Serialize;

/// Everything the page needs for one session, in a single document.
#[derive(Debug, Serialize)]
pub struct PageData<'a> {
    pub repo_url: Option<&'a str>,
    pub analysis: &'a AnalysisResponse,
    pub created: String,
    pub updated: String,
    pub mermaid: String,
    pub charts: Charts,
    pub report: HierarchyReport,
    /// Only present in static exports; the live page asks for scenes on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenes: Option<SceneSet>,
}

#[derive(Debug, Serialize)]
pub struct SceneSet {
    pub force: Scene,
    pub tree: Scene,
    pub pack: Scene,
}

impl<'a> PageData<'a> {
    pub fn new(ctx: &'a RenderContext) -> Self {
        let analysis = ctx.analysis();
        Self {
            repo_url: ctx.repo_url(),
            analysis,
            created: analysis.repo_info.created_display(),
            updated: analysis.repo_info.updated_display(),
            mermaid: ctx.mermaid(),
            charts: ctx.charts(),
            report: ctx.report(),
            scenes: None,
        }
    }

    pub fn with_scenes(mut self, ctx: &RenderContext) -> Self {
        self.scenes = Some(SceneSet {
            force: ctx.scene(Visualization::Force),
            tree: ctx.scene(Visualization::Tree),
            pack: ctx.scene(Visualization::Pack),
        });
        self
    }
}
