use crate::hierarchy::{DEFAULT_SIZE, HierarchyTree};
use crate::model::{FileEntry, FileKind};

/// Draw the file tree with box-drawing connectors. Directories end in `/`.
pub fn render_file_tree(root: &FileEntry) -> String {
    draw(
        root,
        |e: &FileEntry| match e.kind {
            FileKind::Dir => format!("{}/", e.name),
            FileKind::File => e.name.clone(),
        },
        |e: &FileEntry| e.children.as_slice(),
    )
}

/// Draw an expanded dependency hierarchy. Shared nodes appear under each
/// parent; sizes other than the default are shown in brackets.
pub fn render_hierarchy(root: &HierarchyTree) -> String {
    draw(
        root,
        |n: &HierarchyTree| match n.size {
            Some(size) if size != DEFAULT_SIZE => format!("{} [{}]", n.name, size),
            _ => n.name.clone(),
        },
        |n: &HierarchyTree| n.children.as_slice(),
    )
}

fn draw<T, L, C>(root: &T, label: L, children: C) -> String
where
    L: Fn(&T) -> String,
    C: Fn(&T) -> &[T],
{
    let mut output = format!("{}\n", label(root));
    let kids = children(root);
    for (idx, child) in kids.iter().enumerate() {
        write_entry(&mut output, child, "", idx == kids.len() - 1, &label, &children);
    }
    output
}

fn write_entry<T, L, C>(
    output: &mut String,
    entry: &T,
    prefix: &str,
    is_last: bool,
    label: &L,
    children: &C,
) where
    L: Fn(&T) -> String,
    C: Fn(&T) -> &[T],
{
    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(&format!("{}{}{}\n", prefix, connector, label(entry)));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let kids = children(entry);
    for (idx, child) in kids.iter().enumerate() {
        write_entry(output, child, &child_prefix, idx == kids.len() - 1, label, children);
    }
}

/// Paths of every file (not directory) in pre-order; these are the entries
/// that can be sent to the explain endpoint.
pub fn explainable_files(root: &FileEntry) -> Vec<&str> {
    let mut paths = Vec::new();
    collect_files(root, &mut paths);
    paths
}

fn collect_files<'a>(entry: &'a FileEntry, paths: &mut Vec<&'a str>) {
    if entry.kind == FileKind::File {
        paths.push(&entry.path);
    }
    for child in &entry.children {
        collect_files(child, paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy;
    use crate::model::{Edge, Graph, Node};

    fn sample() -> FileEntry {
        FileEntry::dir(
            "demo",
            "",
            vec![
                FileEntry::dir(
                    "src",
                    "src",
                    vec![
                        FileEntry::file("app.js", "src/app.js"),
                        FileEntry::dir("lib", "src/lib", vec![FileEntry::file("util.js", "src/lib/util.js")]),
                    ],
                ),
                FileEntry::file("README.md", "README.md"),
            ],
        )
    }

    #[test]
    fn test_render_file_tree() {
        let expected = "\
demo/
├── src/
│   ├── app.js
│   └── lib/
│       └── util.js
└── README.md
";
        assert_eq!(render_file_tree(&sample()), expected);
    }

    #[test]
    fn test_explainable_files_in_preorder() {
        assert_eq!(
            explainable_files(&sample()),
            vec!["src/app.js", "src/lib/util.js", "README.md"]
        );
    }

    #[test]
    fn test_empty_directory() {
        assert_eq!(render_file_tree(&FileEntry::dir("empty", "", vec![])), "empty/\n");
    }

    #[test]
    fn test_render_hierarchy_repeats_shared_nodes() {
        let graph = Graph::new(
            vec![
                Node::new("a", "a"),
                Node::new("b", "b").with_size(4.0),
                Node::new("c", "c"),
            ],
            vec![Edge::new("a", "b"), Edge::new("a", "c"), Edge::new("b", "c")],
        );
        let expected = "\
root
└── a
    ├── b [4]
    │   └── c
    └── c
";
        assert_eq!(render_hierarchy(&build_hierarchy(&graph).to_tree()), expected);
    }
}
