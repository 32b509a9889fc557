use crate::api::fetch_analysis;
use crate::cli::FetchArgs;
use crate::client::is_github_repo_url;
use crate::fs::default_fs;
use crate::model::AnalysisResponse;
use crate::style;

use super::{CommandContext, block_on, write_output};

pub fn cmd_fetch(args: FetchArgs) -> i32 {
    let ctx = CommandContext::new(args.backend.as_deref());

    if !is_github_repo_url(&args.repo_url) {
        style::error(&format!("Not a GitHub repository URL: {}", args.repo_url));
        style::hint("Expected something like https://github.com/owner/repo");
        return 1;
    }

    style::status(&format!(
        "Analyzing {} via {}",
        style::url(&args.repo_url),
        style::url(&ctx.config.backend.url)
    ));

    let analysis = match block_on(fetch_analysis(&args.repo_url, &ctx.config.backend)) {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(e)) => {
            style::error(&format!("Analysis failed: {}", e));
            return 1;
        }
        Err(code) => return code,
    };

    let json = match serde_json::to_string_pretty(&analysis) {
        Ok(json) => json,
        Err(e) => {
            style::error(&format!("Failed to serialize analysis: {}", e));
            return 1;
        }
    };

    let code = write_output(args.output.as_deref(), &json, default_fs());
    if code == 0 && args.output.is_some() {
        print_summary(&analysis);
    }
    code
}

fn print_summary(analysis: &AnalysisResponse) {
    let info = &analysis.repo_info;
    style::section(&info.name);
    println!("{}", style::metric("Language", info.language.as_deref().unwrap_or("unknown")));
    println!("{}", style::metric("Stars", info.stars));
    println!("{}", style::metric("Forks", info.forks));
    println!("{}", style::metric("Files", analysis.file_structure.file_count()));
    println!("{}", style::metric("Graph nodes", analysis.dependency_data.nodes.len()));
    println!("{}", style::metric("Graph links", analysis.dependency_data.links.len()));
}
