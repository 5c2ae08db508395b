/// Shared data structures for the application state
/// 
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Server-assigned category identifier (a UUID string on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

#[cfg(test)]
impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A category record as returned by `GET /api/categories`.
/// Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID
    pub category_id: CategoryId,
    /// Display title (e.g., "Camping")
    pub title: String,
}

/// A local file chosen in the file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Filename only, for display
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_decodes_camel_case() {
        let json = r#"[
            {"categoryId": "318baf68-71c8-410c-8e1d-21852fbf088e", "title": "Hiking"},
            {"categoryId": "7c08b19f-5846-4b6b-a11e-861d004f8151", "title": "Camping"}
        ]"#;

        let categories: Vec<Category> = serde_json::from_str(json).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category_id.as_str(), "318baf68-71c8-410c-8e1d-21852fbf088e");
        assert_eq!(categories[1].title, "Camping");
    }

    #[test]
    fn test_selected_file_name() {
        let file = SelectedFile::from_path("/home/me/photos/tent.png");
        assert_eq!(file.name, "tent.png");
        assert_eq!(file.path(), Path::new("/home/me/photos/tent.png"));
    }
}
