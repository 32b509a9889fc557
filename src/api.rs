//! Library API for repoviz.
//!
//! The CLI commands print and return exit codes; these functions return
//! `Result`s so the same operations can be driven from other Rust code.
//!
//! # Example
//!
//! ```no_run
//! use repoviz::{load_graph, build_hierarchy, HierarchyReport};
//! use std::path::Path;
//!
//! let graph = load_graph(Path::new("analysis.json"))?;
//! let hierarchy = build_hierarchy(&graph);
//! let report = HierarchyReport::from_hierarchy(&hierarchy);
//! println!("{} top-level nodes", hierarchy.roots().len());
//! for line in report.summary_lines() {
//!     println!("{}", line);
//! }
//! # Ok::<(), repoviz::RepovizError>(())
//! ```

use crate::client::{BackendClient, ClientError};
use crate::config::{BackendConfig, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::hierarchy::{HierarchyTree, build_hierarchy};
use crate::model::{AnalysisResponse, Graph, GraphSource};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepovizError {
    /// A file could not be read or written.
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was read but is not a valid analysis or graph document.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub fn load_analysis(path: &Path) -> Result<AnalysisResponse, RepovizError> {
    load_analysis_with_fs(path, default_fs())
}

/// Read a saved `POST /analyze` response.
pub fn load_analysis_with_fs(
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<AnalysisResponse, RepovizError> {
    read_json(path, fs)
}

pub fn load_graph(path: &Path) -> Result<Graph, RepovizError> {
    load_graph_with_fs(path, default_fs())
}

/// Read a graph from either a full analysis response or a bare
/// `{nodes, links}` document.
pub fn load_graph_with_fs(path: &Path, fs: &dyn FileSystem) -> Result<Graph, RepovizError> {
    read_json::<GraphSource>(path, fs).map(GraphSource::into_graph)
}

/// Load a graph and expand its hierarchy in one step.
///
/// ```no_run
/// let tree = repoviz::hierarchy_from_file(std::path::Path::new("graph.json"))?;
/// println!("{} entries below root", tree.descendant_count());
/// # Ok::<(), repoviz::RepovizError>(())
/// ```
pub fn hierarchy_from_file(path: &Path) -> Result<HierarchyTree, RepovizError> {
    let graph = load_graph(path)?;
    Ok(build_hierarchy(&graph).to_tree())
}

/// Ask the backend for a fresh analysis of `repo_url`.
pub async fn fetch_analysis(
    repo_url: &str,
    config: &BackendConfig,
) -> Result<AnalysisResponse, RepovizError> {
    let client = BackendClient::new(config)?;
    Ok(client.analyze(repo_url).await?)
}

fn read_json<T: serde::de::DeserializeOwned>(
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<T, RepovizError> {
    let content = fs.read_to_string(path).map_err(|source| RepovizError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RepovizError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
