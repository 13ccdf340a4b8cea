//! Graph sources
//!
//! The compiler never discovers dependencies itself: it receives an
//! already-resolved `name -> [dependencies]` mapping from a [`GraphSource`].
//! Files are the common case; an in-memory source carries the demo graph
//! and serves tests and embedders.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::core::graph::RawGraph;
use crate::error::SourceError;
use crate::infra::filesystem;

/// Supplies the raw dependency mapping
pub trait GraphSource {
    /// Fetch the complete mapping
    fn fetch_graph(&self) -> Result<RawGraph, SourceError>;

    /// Short description for log messages
    fn describe(&self) -> String;
}

/// On-disk graph formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// `{"pkg": ["dep"]}`
    Json,
    /// `pkg: [dep]`
    Yaml,
    /// `pkg = ["dep"]`
    Toml,
}

impl GraphFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse a mapping in this format
    ///
    /// A package may map to `null` (or be left empty in YAML) to declare
    /// no dependencies.
    pub fn parse(self, content: &str) -> Result<RawGraph, String> {
        let parsed: GraphEntries = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
            Self::Yaml if content.trim().is_empty() => GraphEntries::default(),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
        };

        Ok(parsed
            .0
            .into_iter()
            .map(|(name, deps)| (name, deps.unwrap_or_default()))
            .collect())
    }
}

/// Top-level package mapping; a repeated package key is an error
#[derive(Debug, Default)]
struct GraphEntries(BTreeMap<String, Option<Vec<String>>>);

impl<'de> Deserialize<'de> for GraphEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(GraphEntriesVisitor)
    }
}

struct GraphEntriesVisitor;

impl<'de> Visitor<'de> for GraphEntriesVisitor {
    type Value = GraphEntries;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of package names to dependency lists")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some(name) = map.next_key::<String>()? {
            let deps: Option<Vec<String>> = map.next_value()?;
            match entries.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(de::Error::custom(format!(
                        "duplicate package '{}'",
                        entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(deps);
                }
            }
        }
        Ok(GraphEntries(entries))
    }
}

/// Reads the mapping from a JSON, YAML or TOML file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for FileSource {
    fn fetch_graph(&self) -> Result<RawGraph, SourceError> {
        let format =
            GraphFormat::from_path(&self.path).ok_or_else(|| SourceError::UnsupportedFormat {
                path: self.path.clone(),
            })?;

        let content = filesystem::read_file(&self.path).map_err(|e| SourceError::Read {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let raw = format.parse(&content).map_err(|error| SourceError::Parse {
            path: self.path.clone(),
            error,
        })?;

        tracing::debug!("Read {} packages from {}", raw.len(), self.path.display());
        Ok(raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory mapping
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    graph: RawGraph,
}

impl StaticSource {
    /// Wrap an existing mapping
    pub fn new(graph: RawGraph) -> Self {
        Self { graph }
    }

    /// The four-package demo graph
    ///
    /// `packageD` needs `packageB` and `packageC`; `packageB` needs
    /// `packageA`.
    pub fn demo() -> Self {
        let graph = [
            ("packageA", vec![]),
            ("packageB", vec!["packageA"]),
            ("packageC", vec![]),
            ("packageD", vec!["packageB", "packageC"]),
        ]
        .into_iter()
        .map(|(name, deps)| {
            (
                name.to_string(),
                deps.into_iter().map(String::from).collect(),
            )
        })
        .collect();

        Self { graph }
    }
}

impl GraphSource for StaticSource {
    fn fetch_graph(&self) -> Result<RawGraph, SourceError> {
        Ok(self.graph.clone())
    }

    fn describe(&self) -> String {
        "built-in graph".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn expected() -> RawGraph {
        RawGraph::from([
            ("lib".to_string(), vec![]),
            ("app".to_string(), vec!["lib".to_string()]),
        ])
    }

    #[test]
    fn test_json_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.json", r#"{"lib": [], "app": ["lib"]}"#);
        assert_eq!(FileSource::new(path).fetch_graph().unwrap(), expected());
    }

    #[test]
    fn test_yaml_file_with_empty_entry() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.yml", "lib:\napp:\n  - lib\n");
        assert_eq!(FileSource::new(path).fetch_graph().unwrap(), expected());
    }

    #[test]
    fn test_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.toml", "lib = []\napp = [\"lib\"]\n");
        assert_eq!(FileSource::new(path).fetch_graph().unwrap(), expected());
    }

    #[test]
    fn test_empty_yaml_is_empty_graph() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.yaml", "");
        assert!(FileSource::new(path).fetch_graph().unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileSource::new("graph.txt").fetch_graph().unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::new(dir.path().join("nope.json"))
            .fetch_graph()
            .unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.json", r#"{"app": "lib"}"#);
        let err = FileSource::new(path).fetch_graph().unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_package_rejected() {
        let err = GraphFormat::Json
            .parse(r#"{"A": [], "B": ["A"], "B": []}"#)
            .unwrap_err();
        assert!(err.contains("duplicate package 'B'"), "{err}");
    }

    #[test]
    fn test_duplicate_package_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "graph.json", r#"{"lib": [], "lib": ["x"]}"#);
        let err = FileSource::new(path).fetch_graph().unwrap_err();
        assert!(matches!(err, SourceError::Parse { ref error, .. } if error.contains("'lib'")));
    }

    #[test]
    fn test_non_map_rejected() {
        assert!(GraphFormat::Json.parse(r#"["A", "B"]"#).is_err());
    }

    #[test]
    fn test_demo_graph() {
        let raw = StaticSource::demo().fetch_graph().unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw["packageD"], vec!["packageB", "packageC"]);
    }
}
