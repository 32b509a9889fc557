use crate::render::Visualization;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repoviz")]
#[command(about = "Explore GitHub repository analyses: dependency layouts, file trees and charts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the local viewer, optionally preloaded with a saved analysis
    Serve(ServeArgs),

    /// Request an analysis from the backend and save or print it
    Fetch(FetchArgs),

    /// Print the dependency hierarchy derived from a graph
    Hierarchy(HierarchyArgs),

    /// Print the repository file tree of a saved analysis
    Tree(TreeArgs),

    /// Print the Mermaid chart of a saved analysis
    Mermaid(MermaidArgs),

    /// Ask the backend to explain one file of a repository
    Explain(ExplainArgs),

    /// Write a saved analysis as a self-contained HTML page
    Export(ExportArgs),

    /// Generate a starter .repoviz.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Analysis JSON to preload
    pub analysis: Option<PathBuf>,

    /// Port for the HTTP server (defaults to the config value, 3000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Backend base URL (overrides .repoviz.toml)
    #[arg(long)]
    pub backend: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    /// GitHub repository URL, e.g. https://github.com/owner/repo
    pub repo_url: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Backend base URL (overrides .repoviz.toml)
    #[arg(long)]
    pub backend: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HierarchyArgs {
    /// Analysis response or bare {nodes, links} graph
    pub input: PathBuf,

    /// Print shared, unreachable and cyclic nodes instead of the tree
    #[arg(long)]
    pub report: bool,

    /// Print the scene description for one layout instead of the tree
    #[arg(long, conflicts_with = "report")]
    pub scene: Option<Visualization>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Analysis JSON
    pub analysis: PathBuf,

    /// Also list the files that can be explained
    #[arg(long)]
    pub files: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MermaidArgs {
    /// Analysis JSON
    pub analysis: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExplainArgs {
    /// GitHub repository URL
    pub repo_url: String,

    /// Path of the file inside the repository
    pub file_path: String,

    /// Backend base URL (overrides .repoviz.toml)
    #[arg(long)]
    pub backend: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Analysis JSON
    pub analysis: PathBuf,

    /// HTML file to write
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory for .repoviz.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
