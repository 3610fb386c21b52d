use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{NtsError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "projects.json";

/// One configured repository.
///
/// The record is kept exactly as it appeared in the file; `url` and `notes`
/// are read from it when they hold strings, anything else is left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project {
    raw: Value,
}

impl Project {
    pub fn new(url: impl Into<String>) -> Self {
        let mut record = Map::new();
        record.insert("url".to_string(), Value::String(url.into()));
        Self {
            raw: Value::Object(record),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        if let Value::Object(record) = &mut self.raw {
            record.insert("notes".to_string(), Value::String(notes.into()));
        }
        self
    }

    /// Repository URL, or `""` when the record has no string `url`.
    pub fn url(&self) -> &str {
        self.string_field("url").unwrap_or_default()
    }

    pub fn notes(&self) -> Option<&str> {
        self.string_field("notes")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

/// Project name -> project record, as stored in `projects.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectConfig {
    pub projects: BTreeMap<String, Project>,
}

impl ProjectConfig {
    /// The example written by `generate sample`.
    pub fn sample() -> Self {
        let mut config = Self::default();
        config.insert(
            "project A".to_string(),
            Project::new("https://subversion.example.com/repo/trunk").with_notes("replace me!"),
        );
        config
    }

    /// Search `search_dirs` in order for `file` and parse the first hit.
    pub fn load(file: &Path, search_dirs: &[PathBuf]) -> Result<Self> {
        let candidates: Vec<PathBuf> = search_dirs.iter().map(|dir| dir.join(file)).collect();
        let path = locate(&candidates)?;
        let config = Self::load_from(&path)?;
        debug!("load: {} project(s) from {}", config.len(), path.display());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;

        serde_json::from_str(&contents).map_err(|source| NtsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config to `path`, replacing whatever is there.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_pretty_json()?;

        std::fs::write(path, contents).map_err(|source| NtsError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn insert(&mut self, name: String, project: Project) -> Option<Project> {
        self.projects.insert(name, project)
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.projects.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl IntoIterator for ProjectConfig {
    type Item = (String, Project);
    type IntoIter = std::collections::btree_map::IntoIter<String, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.into_iter()
    }
}

/// Directories searched for the project config: the working directory,
/// then the user's home directory.
pub fn search_dirs() -> Result<Vec<PathBuf>> {
    let mut dirs = vec![std::env::current_dir()?];
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    Ok(dirs)
}

fn locate(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
        debug!("locate: no config at {}", candidate.display());
    }
    Err(NtsError::ConfigNotFound(candidates.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_PROJECTS: &str = r#"{
    "alpha": { "url": "https://svn.example.com/alpha/trunk" },
    "beta": { "url": "https://svn.example.com/beta/trunk", "notes": "legacy" }
}"#;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_from_cwd() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(cwd.path(), "projects.json", TWO_PROJECTS);

        let dirs = vec![cwd.path().to_path_buf(), home.path().to_path_buf()];
        let config = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap();

        assert_eq!(config.names(), vec!["alpha", "beta"]);
        assert_eq!(config.get("alpha").unwrap().url(), "https://svn.example.com/alpha/trunk");
        assert_eq!(config.get("alpha").unwrap().notes(), None);
        assert_eq!(config.get("beta").unwrap().notes(), Some("legacy"));
    }

    #[test]
    fn test_load_falls_back_to_home() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(home.path(), "projects.json", TWO_PROJECTS);

        let dirs = vec![cwd.path().to_path_buf(), home.path().to_path_buf()];
        let config = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap();
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_load_prefers_cwd_over_home() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(cwd.path(), "projects.json", r#"{ "local": { "url": "u1" } }"#);
        write(home.path(), "projects.json", r#"{ "global": { "url": "u2" } }"#);

        let dirs = vec![cwd.path().to_path_buf(), home.path().to_path_buf()];
        let config = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap();
        assert_eq!(config.names(), vec!["local"]);
    }

    #[test]
    fn test_load_not_found_lists_attempted_paths() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();

        let dirs = vec![cwd.path().to_path_buf(), home.path().to_path_buf()];
        let err = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap_err();

        match &err {
            NtsError::ConfigNotFound(paths) => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[0], cwd.path().join("projects.json"));
                assert_eq!(paths[1], home.path().join("projects.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains(&cwd.path().join("projects.json").display().to_string()));
        assert!(message.contains(&home.path().join("projects.json").display().to_string()));
    }

    #[test]
    fn test_load_invalid_json() {
        let cwd = TempDir::new().unwrap();
        write(cwd.path(), "projects.json", "{ not json");

        let dirs = vec![cwd.path().to_path_buf()];
        let err = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap_err();
        assert!(matches!(err, NtsError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let cwd = TempDir::new().unwrap();
        write(cwd.path(), "projects.json", "[1, 2, 3]");

        let dirs = vec![cwd.path().to_path_buf()];
        let err = ProjectConfig::load(Path::new("projects.json"), &dirs).unwrap_err();
        assert!(matches!(err, NtsError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_keeps_unknown_keys() {
        let cwd = TempDir::new().unwrap();
        write(
            cwd.path(),
            "projects.json",
            r#"{ "alpha": { "url": "u", "owner": "ops", "tags": ["a"] }, "bare": {} }"#,
        );

        let config = ProjectConfig::load_from(&cwd.path().join("projects.json")).unwrap();
        assert_eq!(config.get("alpha").unwrap().url(), "u");
        assert_eq!(config.get("bare").unwrap().url(), "");

        config.save(&cwd.path().join("out.json")).unwrap();
        let reloaded = ProjectConfig::load_from(&cwd.path().join("out.json")).unwrap();
        assert_eq!(reloaded, config);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(cwd.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written["alpha"]["owner"], serde_json::json!("ops"));
        assert_eq!(written["alpha"]["tags"], serde_json::json!(["a"]));
    }

    #[test]
    fn test_load_accepts_loosely_typed_records() {
        let cwd = TempDir::new().unwrap();
        let original = serde_json::json!({
            "numeric-notes": { "url": "u", "notes": 42 },
            "null-url": { "url": null },
            "null-notes": { "url": "u", "notes": null },
            "plain-string": "https://svn/a"
        });
        write(cwd.path(), "projects.json", &original.to_string());

        let config = ProjectConfig::load_from(&cwd.path().join("projects.json")).unwrap();
        assert_eq!(config.len(), 4);
        assert_eq!(config.get("numeric-notes").unwrap().url(), "u");
        assert_eq!(config.get("numeric-notes").unwrap().notes(), None);
        assert_eq!(config.get("null-url").unwrap().url(), "");
        assert_eq!(config.get("plain-string").unwrap().url(), "");

        config.save(&cwd.path().join("out.json")).unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(cwd.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn test_sample_contents() {
        let sample = ProjectConfig::sample();
        assert_eq!(sample.names(), vec!["project A"]);
        let project = sample.get("project A").unwrap();
        assert_eq!(project.url(), "https://subversion.example.com/repo/trunk");
        assert_eq!(project.notes(), Some("replace me!"));
    }

    #[test]
    fn test_sample_save_overwrites_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.json");
        write(dir.path(), "projects.json", TWO_PROJECTS);

        ProjectConfig::sample().save(&path).unwrap();

        let loaded = ProjectConfig::load_from(&path).unwrap();
        assert_eq!(loaded, ProjectConfig::sample());
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let json = ProjectConfig::sample().to_pretty_json().unwrap();
        assert!(json.contains("\n    \"project A\": {\n        \"url\""));
        assert!(json.contains("\n        \"notes\": \"replace me!\"\n    }"));
    }

    #[test]
    fn test_save_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("projects.json");
        let err = ProjectConfig::sample().save(&path).unwrap_err();
        assert!(matches!(err, NtsError::ConfigWrite { .. }));
    }
}
