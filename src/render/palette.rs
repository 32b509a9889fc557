//! Fixed colour lookups shared by the scenes.

use crate::model::NodeKind;

pub const FILE_COLOR: &str = "#4e79a7";
pub const DIRECTORY_COLOR: &str = "#f28e2c";
pub const PACKAGE_COLOR: &str = "#e15759";
pub const DEFAULT_COLOR: &str = "#69b3a2";

/// d3.schemeCategory10
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn node_color(kind: Option<&NodeKind>) -> &'static str {
    match kind {
        Some(NodeKind::File) => FILE_COLOR,
        Some(NodeKind::Directory) => DIRECTORY_COLOR,
        Some(NodeKind::Package) => PACKAGE_COLOR,
        _ => DEFAULT_COLOR,
    }
}

/// Bar colour for a complexity score: low, medium, high.
pub fn complexity_color(complexity: f64) -> &'static str {
    if complexity < 10.0 {
        FILE_COLOR
    } else if complexity < 20.0 {
        DIRECTORY_COLOR
    } else {
        PACKAGE_COLOR
    }
}

/// Ordinal colour for the `index`-th category.
pub fn category_color(index: usize) -> &'static str {
    CATEGORY10[index % CATEGORY10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_colors() {
        assert_eq!(node_color(Some(&NodeKind::File)), "#4e79a7");
        assert_eq!(node_color(Some(&NodeKind::Directory)), "#f28e2c");
        assert_eq!(node_color(Some(&NodeKind::Package)), "#e15759");
        assert_eq!(node_color(Some(&NodeKind::Other("dir".into()))), "#69b3a2");
        assert_eq!(node_color(None), "#69b3a2");
    }

    #[test]
    fn test_complexity_thresholds() {
        assert_eq!(complexity_color(9.9), FILE_COLOR);
        assert_eq!(complexity_color(10.0), DIRECTORY_COLOR);
        assert_eq!(complexity_color(19.0), DIRECTORY_COLOR);
        assert_eq!(complexity_color(20.0), PACKAGE_COLOR);
    }

    #[test]
    fn test_category_colors_wrap() {
        assert_eq!(category_color(0), category_color(10));
        assert_ne!(category_color(0), category_color(1));
    }
}
