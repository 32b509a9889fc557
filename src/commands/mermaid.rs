use crate::api::load_analysis_with_fs;
use crate::cli::MermaidArgs;
use crate::fs::{FileSystem, default_fs};
use crate::style;

use super::write_output;

pub fn cmd_mermaid(args: MermaidArgs) -> i32 {
    cmd_mermaid_with_fs(args, default_fs())
}

pub fn cmd_mermaid_with_fs(args: MermaidArgs, fs: &dyn FileSystem) -> i32 {
    let analysis = match load_analysis_with_fs(&args.analysis, fs) {
        Ok(analysis) => analysis,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    if analysis.mermaid_chart.trim().is_empty() {
        style::warning("Analysis has no Mermaid chart; generating one from the file tree");
    }

    write_output(args.output.as_deref(), &analysis.mermaid(), fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    fn run(analysis: &str) -> String {
        let fs = MockFs::with_files([("/a.json", analysis)]);
        let args = MermaidArgs {
            analysis: PathBuf::from("/a.json"),
            output: Some(PathBuf::from("/chart.mmd")),
        };
        assert_eq!(cmd_mermaid_with_fs(args, &fs), 0);
        fs.get("/chart.mmd").unwrap()
    }

    #[test]
    fn test_strips_fence() {
        let chart = run(r#"{"repoInfo": {"name": "x"}, "mermaidChart": "```mermaid\ngraph TD\nA-->B\n```"}"#);
        assert_eq!(chart, "graph TD\nA-->B");
    }

    #[test]
    fn test_falls_back_to_file_tree() {
        let chart = run(
            r#"{"repoInfo": {"name": "x"}, "fileStructure": {"name": "x", "type": "dir", "children": [{"name": "a.rs", "type": "file"}]}}"#,
        );
        assert!(chart.starts_with("flowchart TD\nnode1[\"x (dir)\"]"));
        assert!(chart.contains("node1 --> node2"));
    }
}
