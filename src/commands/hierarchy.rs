use crate::api::load_graph_with_fs;
use crate::cli::{HierarchyArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::hierarchy::{HierarchyReport, build_hierarchy};
use crate::model::Graph;
use crate::render::{Scene, render_hierarchy};
use crate::style;

use super::write_output;

pub fn cmd_hierarchy(args: HierarchyArgs) -> i32 {
    cmd_hierarchy_with_fs(args, default_fs())
}

pub fn cmd_hierarchy_with_fs(args: HierarchyArgs, fs: &dyn FileSystem) -> i32 {
    let graph = match load_graph_with_fs(&args.input, fs) {
        Ok(graph) => graph,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    let rendered = match render(&args, &graph) {
        Ok(text) => text,
        Err(e) => {
            style::error(&format!("Failed to serialize output: {}", e));
            return 1;
        }
    };

    write_output(args.output.as_deref(), &rendered, fs)
}

fn render(args: &HierarchyArgs, graph: &Graph) -> Result<String, serde_json::Error> {
    if let Some(kind) = args.scene {
        return serde_json::to_string_pretty(&Scene::build(kind, graph));
    }

    let hierarchy = build_hierarchy(graph);

    if args.report {
        let report = HierarchyReport::from_hierarchy(&hierarchy);
        return match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&report),
            OutputFormat::Text if report.is_strict_tree() => {
                Ok("Every node appears exactly once under the root.".to_string())
            }
            OutputFormat::Text => Ok(report.summary_lines().join("\n")),
        };
    }

    let tree = hierarchy.to_tree();
    match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&tree),
        OutputFormat::Text => Ok(render_hierarchy(&tree)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use crate::render::Visualization;
    use std::path::PathBuf;

    const GRAPH: &str = r#"{
        "nodes": [{"id": "a", "name": "a"}, {"id": "b", "name": "b"}, {"id": "c", "name": "c"}],
        "links": [{"source": "a", "target": "b"}, {"source": "a", "target": "c"}, {"source": "b", "target": "c"}]
    }"#;

    fn args() -> HierarchyArgs {
        HierarchyArgs {
            input: PathBuf::from("/graph.json"),
            report: false,
            scene: None,
            format: OutputFormat::Text,
            output: Some(PathBuf::from("/out.txt")),
        }
    }

    fn run(args: HierarchyArgs) -> String {
        let fs = MockFs::with_files([("/graph.json", GRAPH)]);
        assert_eq!(cmd_hierarchy_with_fs(args, &fs), 0);
        fs.get("/out.txt").unwrap()
    }

    #[test]
    fn test_text_tree() {
        let out = run(args());
        assert!(out.starts_with("root\n└── a\n"));
        assert_eq!(out.matches("── c").count(), 2);
    }

    #[test]
    fn test_report_text_lists_shared_node() {
        let out = run(HierarchyArgs {
            report: true,
            ..args()
        });
        assert_eq!(out, "1 node(s) appear under several parents: c");
    }

    #[test]
    fn test_report_json() {
        let out = run(HierarchyArgs {
            report: true,
            format: OutputFormat::Json,
            ..args()
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["shared"], serde_json::json!(["c"]));
        assert_eq!(value["cycles"], serde_json::json!([]));
    }

    #[test]
    fn test_scene_json() {
        let out = run(HierarchyArgs {
            scene: Some(Visualization::Force),
            ..args()
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], "force");
        assert_eq!(value["links"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_input_fails() {
        assert_eq!(cmd_hierarchy_with_fs(args(), &MockFs::new()), 1);
    }
}
