use crate::api::load_analysis_with_fs;
use crate::cli::TreeArgs;
use crate::fs::{FileSystem, default_fs};
use crate::model::AnalysisResponse;
use crate::render::{explainable_files, render_file_tree};
use crate::style;

pub fn cmd_tree(args: TreeArgs) -> i32 {
    cmd_tree_with_fs(args, default_fs())
}

pub fn cmd_tree_with_fs(args: TreeArgs, fs: &dyn FileSystem) -> i32 {
    let analysis = match load_analysis_with_fs(&args.analysis, fs) {
        Ok(analysis) => analysis,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    print_repo_info(&analysis);
    style::section("Files");
    print!("{}", render_file_tree(&analysis.file_structure));

    if args.files {
        style::section("Explainable files");
        for path in explainable_files(&analysis.file_structure) {
            println!("  {}", path);
        }
    }
    0
}

fn print_repo_info(analysis: &AnalysisResponse) {
    let info = &analysis.repo_info;
    style::section(info.full_name.as_deref().unwrap_or(&info.name));
    if let Some(description) = &info.description {
        println!("  {}", description);
    }
    for (label, value) in repo_metrics(analysis) {
        println!("{}", style::metric(label, value));
    }
    if let Some(url) = &info.url {
        println!("  {}", style::url(url));
    }
}

fn repo_metrics(analysis: &AnalysisResponse) -> Vec<(&'static str, String)> {
    let info = &analysis.repo_info;
    vec![
        ("Language", info.language.clone().unwrap_or_else(|| "unknown".to_string())),
        ("Stars", info.stars.to_string()),
        ("Forks", info.forks.to_string()),
        ("Created", info.created_display()),
        ("Updated", info.updated_display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    #[test]
    fn test_repo_metrics_format_dates() {
        let analysis: AnalysisResponse = serde_json::from_str(
            r#"{"repoInfo": {"name": "demo", "stars": 7, "created_at": "2021-03-04T05:06:07Z"}}"#,
        )
        .unwrap();
        let metrics = repo_metrics(&analysis);
        assert_eq!(metrics[0], ("Language", "unknown".to_string()));
        assert_eq!(metrics[1], ("Stars", "7".to_string()));
        assert_eq!(metrics[3], ("Created", "March 4, 2021".to_string()));
        assert_eq!(metrics[4], ("Updated", "-".to_string()));
    }

    #[test]
    fn test_missing_analysis_fails() {
        let args = TreeArgs {
            analysis: PathBuf::from("/none.json"),
            files: false,
        };
        assert_eq!(cmd_tree_with_fs(args, &MockFs::new()), 1);
    }
}
