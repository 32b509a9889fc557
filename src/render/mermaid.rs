use crate::model::{FileEntry, FileKind};

/// Levels below the tree root included in the fallback chart.
const MAX_DEPTH: usize = 3;

/// Children shown per directory in the fallback chart.
const MAX_CHILDREN: usize = 10;

const DIR_STYLE: &str = "fill:#f9f,stroke:#333,stroke-width:1px";
const FILE_STYLE: &str = "fill:#bbf,stroke:#333,stroke-width:1px";

/// Remove the Markdown code fences an LLM may have wrapped the chart in,
/// wherever they appear.
pub fn strip_code_fence(chart: &str) -> String {
    chart
        .replace("```mermaid", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// `flowchart TD` generated from the file tree, used when the backend
/// returned no chart.
pub fn fallback_flowchart(root: &FileEntry) -> String {
    let mut lines = vec!["flowchart TD".to_string()];
    let mut counter = 0usize;
    emit(root, None, 0, &mut counter, &mut lines);
    lines.join("\n")
}

fn emit(
    entry: &FileEntry,
    parent: Option<&str>,
    level: usize,
    counter: &mut usize,
    lines: &mut Vec<String>,
) {
    if level > MAX_DEPTH {
        return;
    }

    *counter += 1;
    let id = format!("node{}", counter);

    let (label, style) = match entry.kind {
        FileKind::Dir => (format!("{} (dir)", entry.name), DIR_STYLE),
        FileKind::File => (entry.name.clone(), FILE_STYLE),
    };
    let url = entry.url.as_deref().unwrap_or("#");

    lines.push(format!("{}[\"{}\"]", id, escape_label(&label)));
    lines.push(format!("click {} href \"{}\" _blank", id, url));
    lines.push(format!("style {} {}", id, style));
    if let Some(parent) = parent {
        lines.push(format!("{} --> {}", parent, id));
    }

    for child in entry.children.iter().take(MAX_CHILDREN) {
        emit(child, Some(&id), level + 1, counter, lines);
    }
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```mermaid\nflowchart TD\nA-->B\n```"), "flowchart TD\nA-->B");
        assert_eq!(strip_code_fence("```\nflowchart TD\n```\n"), "flowchart TD");
        assert_eq!(strip_code_fence("  flowchart TD  "), "flowchart TD");
        assert_eq!(strip_code_fence(""), "");
    }

    #[test]
    fn test_strip_code_fence_removes_inner_fences() {
        assert_eq!(
            strip_code_fence("Here you go:\n```mermaid\nflowchart TD\nA-->B\n```\n```"),
            "Here you go:\n\nflowchart TD\nA-->B"
        );
        assert_eq!(strip_code_fence("flowchart TD\n```\nA-->B"), "flowchart TD\n\nA-->B");
    }

    #[test]
    fn test_fallback_flowchart_shape() {
        let mut root = FileEntry::dir("demo", "", vec![FileEntry::file("a.py", "a.py")]);
        root.url = Some("https://github.com/o/demo".to_string());
        let chart = fallback_flowchart(&root);

        let expected = "\
flowchart TD
node1[\"demo (dir)\"]
click node1 href \"https://github.com/o/demo\" _blank
style node1 fill:#f9f,stroke:#333,stroke-width:1px
node2[\"a.py\"]
click node2 href \"#\" _blank
style node2 fill:#bbf,stroke:#333,stroke-width:1px
node1 --> node2";
        assert_eq!(chart, expected);
    }

    #[test]
    fn test_fallback_limits_depth_and_breadth() {
        let wide: Vec<FileEntry> = (0..15)
            .map(|i| FileEntry::file(format!("f{}.rs", i), format!("f{}.rs", i)))
            .collect();
        let deep = FileEntry::dir(
            "l1",
            "l1",
            vec![FileEntry::dir(
                "l2",
                "l1/l2",
                vec![FileEntry::dir("l3", "l1/l2/l3", vec![FileEntry::file("l4.rs", "l1/l2/l3/l4.rs")])],
            )],
        );
        let mut children = vec![deep];
        children.extend(wide);
        let chart = fallback_flowchart(&FileEntry::dir("root", "", children));

        // root + l1 + l2 + l3 + 9 files; l4.rs sits below the depth limit.
        assert_eq!(chart.matches("click ").count(), 13);
        assert!(chart.contains("l3 (dir)"));
        assert!(!chart.contains("l4.rs"));
        assert!(!chart.contains("f9.rs"));
    }
}
