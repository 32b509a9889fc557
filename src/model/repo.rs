use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Repository metadata as reported by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RepoInfo {
    pub fn created_display(&self) -> String {
        format_date(self.created_at.as_deref())
    }

    pub fn updated_display(&self) -> String {
        format_date(self.updated_at.as_deref())
    }
}

/// Format an ISO-8601 timestamp as "January 2, 2020".
///
/// Accepts offsets (`2020-01-02T03:04:05+00:00`, `...Z`) and naive timestamps.
/// Missing values render as `-`; unparseable ones are returned verbatim.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return "-".to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()));

    match date {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Dir,
    File,
}

/// One entry of the repository file tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<FileEntry>,
}

impl FileEntry {
    pub fn dir(name: impl Into<String>, path: impl Into<String>, children: Vec<FileEntry>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: FileKind::Dir,
            url: None,
            children,
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: FileKind::File,
            url: None,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }

    /// Number of file entries below (and including) this one.
    pub fn file_count(&self) -> usize {
        match self.kind {
            FileKind::File => 1,
            FileKind::Dir => self.children.iter().map(FileEntry::file_count).sum(),
        }
    }
}

impl Default for FileEntry {
    fn default() -> Self {
        Self::dir("", "", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date(Some("2020-01-02T03:04:05+00:00")), "January 2, 2020");
        assert_eq!(format_date(Some("2021-11-30T23:59:59Z")), "November 30, 2021");
        assert_eq!(format_date(Some("2019-07-04T12:00:00")), "July 4, 2019");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date(Some("yesterday")), "yesterday");
    }

    #[test]
    fn test_file_entry_deserializes_backend_shape() {
        let entry: FileEntry = serde_json::from_str(
            r#"{
                "name": "demo", "type": "dir", "path": "", "url": "https://github.com/o/demo",
                "children": [
                    {"name": "README.md", "path": "README.md", "type": "file", "url": "u", "children": []},
                    {"name": "src", "path": "src", "type": "dir", "children": [
                        {"name": "main.py", "path": "src/main.py", "type": "file"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert!(entry.is_dir());
        assert_eq!(entry.children.len(), 2);
        assert_eq!(entry.file_count(), 2);
        assert_eq!(entry.children[1].children[0].path, "src/main.py");
    }
}
