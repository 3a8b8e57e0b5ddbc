//! Dependency manifest (`deps.json`) parsing.
//!
//! A manifest is a JSON array of records, installed in the order listed:
//!
//! ```json
//! [
//!   { "vcs": "git", "repo": "https://github.com/user/lib.git", "rev": "abc123", "path": "github.com/user/lib" },
//!   { "vcs": "hg", "repo": "https://hg.example.org/tool", "rev": "v1.2", "path": "hg.example.org/tool" }
//! ]
//! ```
//!
//! Missing and `null` fields decode as empty strings, and a `null` manifest is
//! an empty list. Keys match case-insensitively (`"VCS"` is `vcs`). No other
//! defaults are applied.

use crate::error::{Result, VendorError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Version control system named by a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Vcs {
    Git,
    Hg,
    /// Any other tag, including the empty string. Nothing is fetched.
    #[default]
    Unsupported,
}

impl From<&str> for Vcs {
    fn from(tag: &str) -> Self {
        match tag {
            "git" => Vcs::Git,
            "hg" => Vcs::Hg,
            _ => Vcs::Unsupported,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    /// Raw VCS tag as written in the manifest.
    #[serde(deserialize_with = "null_as_empty")]
    pub vcs: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub repo: String,
    /// Revision, commit hash or tag to pin to.
    #[serde(deserialize_with = "null_as_empty")]
    pub rev: String,
    /// Location under the vendor root.
    #[serde(deserialize_with = "null_as_empty")]
    pub path: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lowercases the keys of a record object so field names match in any case.
fn fold_keys(record: Value) -> Value {
    match record {
        Value::Object(fields) => {
            let mut folded = Map::new();
            for (key, value) in fields {
                folded.insert(key.to_lowercase(), value);
            }
            Value::Object(folded)
        }
        other => other,
    }
}

impl Dependency {
    pub fn vcs(&self) -> Vcs {
        Vcs::from(self.vcs.as_str())
    }
}

/// Decodes manifest text. `origin` is only used in error messages.
pub fn parse_manifest(content: &str, origin: &Path) -> Result<Vec<Dependency>> {
    let parse_err = |source| VendorError::Parse {
        path: origin.to_path_buf(),
        source,
    };

    let records: Option<Vec<Value>> = serde_json::from_str(content).map_err(parse_err)?;
    records
        .unwrap_or_default()
        .into_iter()
        .map(|record| serde_json::from_value(fold_keys(record)).map_err(parse_err))
        .collect()
}

pub fn load_manifest(path: &Path) -> Result<Vec<Dependency>> {
    let content = fs::read_to_string(path).map_err(|source| VendorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_manifest_order() {
        let json = r#"[
            {"vcs": "git", "repo": "https://example/a.git", "rev": "abc123", "path": "a"},
            {"vcs": "hg", "repo": "https://example/b", "rev": "tip", "path": "b"},
            {"vcs": "git", "repo": "https://example/c.git", "rev": "v1.0", "path": "nested/c"}
        ]"#;
        let deps = parse_manifest(json, Path::new("deps.json")).unwrap();
        let paths: Vec<&str> = deps.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["a", "b", "nested/c"]);
        assert_eq!(deps[0].vcs(), Vcs::Git);
        assert_eq!(deps[1].vcs(), Vcs::Hg);
        assert_eq!(deps[0].rev, "abc123");
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let deps = parse_manifest(r#"[{"repo": "https://example/a.git"}]"#, Path::new("x")).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].vcs, "");
        assert_eq!(deps[0].rev, "");
        assert_eq!(deps[0].path, "");
        assert_eq!(deps[0].vcs(), Vcs::Unsupported);
    }

    #[test]
    fn test_unknown_vcs_is_unsupported() {
        let deps = parse_manifest(
            r#"[{"vcs": "svn", "repo": "svn://example/a", "rev": "12", "path": "a"}]"#,
            Path::new("x"),
        )
        .unwrap();
        assert_eq!(deps[0].vcs(), Vcs::Unsupported);
        // Tags are case sensitive.
        assert_eq!(Vcs::from("Git"), Vcs::Unsupported);
    }

    #[test]
    fn test_null_fields_decode_empty() {
        let deps = parse_manifest(
            r#"[{"vcs": "git", "repo": "https://example/a.git", "rev": null, "path": "a"}]"#,
            Path::new("x"),
        )
        .unwrap();
        assert_eq!(deps[0].rev, "");
        assert_eq!(deps[0].vcs(), Vcs::Git);
    }

    #[test]
    fn test_null_manifest_is_empty() {
        let deps = parse_manifest("null", Path::new("x")).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_keys_match_any_case() {
        let deps = parse_manifest(
            r#"[{"VCS": "git", "Repo": "https://example/a.git", "REV": "abc", "pAtH": "a"}]"#,
            Path::new("x"),
        )
        .unwrap();
        assert_eq!(deps[0].vcs(), Vcs::Git);
        assert_eq!(deps[0].repo, "https://example/a.git");
        assert_eq!(deps[0].rev, "abc");
        assert_eq!(deps[0].path, "a");
    }

    #[test]
    fn test_non_object_record_is_parse_error() {
        let err = parse_manifest(r#"["git"]"#, Path::new("x")).unwrap_err();
        assert!(matches!(err, VendorError::Parse { .. }));
    }

    #[test]
    fn test_empty_array() {
        let deps = parse_manifest("[]", Path::new("x")).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        let err = parse_manifest("[{\"vcs\": \"git\",", Path::new("deps.json")).unwrap_err();
        assert!(matches!(err, VendorError::Parse { .. }));
        assert!(err.to_string().contains("deps.json"));

        // A single object is not a manifest.
        let err = parse_manifest(r#"{"vcs": "git"}"#, Path::new("deps.json")).unwrap_err();
        assert!(matches!(err, VendorError::Parse { .. }));
    }

    #[test]
    fn test_non_string_field_is_parse_error() {
        let err = parse_manifest(r#"[{"vcs": "git", "rev": 42}]"#, Path::new("x")).unwrap_err();
        assert!(matches!(err, VendorError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_manifest(&missing).unwrap_err();
        match err {
            VendorError::Read { path, .. } => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("deps.json");
        fs::write(
            &manifest,
            r#"[{"vcs":"git","repo":"https://example/a.git","rev":"abc123","path":"a"}]"#,
        )
        .unwrap();
        let deps = load_manifest(&manifest).unwrap();
        assert_eq!(
            deps,
            vec![Dependency {
                vcs: "git".to_string(),
                repo: "https://example/a.git".to_string(),
                rev: "abc123".to_string(),
                path: "a".to_string(),
            }]
        );
    }
}
