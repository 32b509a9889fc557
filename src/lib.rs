pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod fs;
pub mod hierarchy;
pub mod model;
pub mod render;
pub mod style;
pub mod viewer;

pub use api::{
    RepovizError, fetch_analysis, hierarchy_from_file, load_analysis, load_analysis_with_fs,
    load_graph, load_graph_with_fs,
};
pub use cli::Cli;
pub use client::{BackendClient, ClientError, is_github_repo_url};
pub use commands::{
    cmd_explain, cmd_export, cmd_fetch, cmd_hierarchy, cmd_init, cmd_mermaid, cmd_serve, cmd_tree,
};
pub use config::{BackendConfig, Config, ConfigError, ViewerConfig};
pub use hierarchy::{
    Hierarchy, HierarchyNode, HierarchyReport, HierarchyTree, MAX_EXPANSION_DEPTH, build_hierarchy,
};
pub use model::{AnalysisResponse, Edge, Endpoint, FileEntry, Graph, Node, NodeId, NodeKind};
pub use render::{RenderContext, Scene, Visualization};
