use super::palette::{category_color, complexity_color};
use crate::model::{CodeQuality, ComplexityEntry, LanguageShare};
use serde::Serialize;

/// Slices under this share (after rounding to one decimal) get no label.
const MIN_LABELLED_PERCENT: f64 = 5.0;

/// Head-room above the tallest bar.
const BAR_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub languages: PieChart,
    pub complexity: BarChart,
}

impl Charts {
    pub fn from_quality(quality: &CodeQuality) -> Self {
        Self {
            languages: PieChart::from_shares(&quality.language_distribution),
            complexity: BarChart::from_entries(&quality.complexity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub language: String,
    pub percentage: f64,
    pub color: &'static str,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Slices keep input order (no sorting), colours follow that order.
    pub fn from_shares(shares: &[LanguageShare]) -> Self {
        let slices = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let rounded = (share.percentage * 10.0).round() / 10.0;
                PieSlice {
                    language: share.language.clone(),
                    percentage: share.percentage,
                    color: category_color(i),
                    tooltip: format!("{:.1}%", share.percentage),
                    label: (rounded >= MIN_LABELLED_PERCENT)
                        .then(|| format!("{} ({:.1}%)", share.language, share.percentage)),
                }
            })
            .collect();

        Self {
            title: "Language Distribution",
            slices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub file: String,
    pub complexity: f64,
    pub lines: u64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_max: f64,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_entries(entries: &[ComplexityEntry]) -> Self {
        let bars: Vec<Bar> = entries
            .iter()
            .map(|e| Bar {
                file: e.file.clone(),
                complexity: e.complexity,
                lines: e.lines,
                fill: complexity_color(e.complexity),
            })
            .collect();

        let y_max = bars
            .iter()
            .map(|b| b.complexity)
            .fold(None, |max: Option<f64>, c| Some(max.map_or(c, |m| m.max(c))))
            .map_or(0.0, |m| m * BAR_HEADROOM);

        Self {
            title: "Code Complexity",
            x_label: "File",
            y_label: "Complexity",
            y_max,
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(language: &str, percentage: f64) -> LanguageShare {
        LanguageShare {
            language: language.to_string(),
            percentage,
        }
    }

    #[test]
    fn test_pie_labels_skip_small_slices() {
        let pie = PieChart::from_shares(&[
            share("Python", 80.0),
            share("Shell", 4.96),
            share("HTML", 4.9),
        ]);

        assert_eq!(pie.slices[0].label.as_deref(), Some("Python (80.0%)"));
        // 4.96 rounds to 5.0 and keeps its label.
        assert_eq!(pie.slices[1].label.as_deref(), Some("Shell (5.0%)"));
        assert_eq!(pie.slices[2].label, None);
        assert_eq!(pie.slices[0].color, "#1f77b4");
        assert_eq!(pie.slices[1].color, "#ff7f0e");
    }

    #[test]
    fn test_bar_chart_colors_and_scale() {
        let entry = |file: &str, complexity: f64| ComplexityEntry {
            file: file.to_string(),
            complexity,
            lines: 100,
        };
        let chart = BarChart::from_entries(&[entry("a.py", 25.0), entry("b.py", 12.0), entry("c.py", 5.0)]);

        let fills: Vec<_> = chart.bars.iter().map(|b| b.fill).collect();
        assert_eq!(fills, vec!["#e15759", "#f28e2c", "#4e79a7"]);
        assert!((chart.y_max - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_bar_chart() {
        let chart = BarChart::from_entries(&[]);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.y_max, 0.0);
    }
}
