use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeQuality {
    #[serde(default)]
    pub language_distribution: Vec<LanguageShare>,
    #[serde(default)]
    pub complexity: Vec<ComplexityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityEntry {
    pub file: String,
    pub complexity: f64,
    #[serde(default)]
    pub lines: u64,
}
