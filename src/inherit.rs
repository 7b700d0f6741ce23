//! Configuration inheritance.
//!
//! A document may name an ancestor via its `parent_config` key. Resolution
//! loads the whole chain and deep-merges it eldest-first, so explicitly
//! present child keys always win while absent sections inherit wholesale.
//!
//! The walk is iterative with an explicit depth counter: a chain that still
//! names a parent after [`MAX_PARENT_DEPTH`] reads is treated as a loop and
//! resolution fails. This is a deliberate safety cutoff, independent of
//! whether a true cycle exists.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::merge::merge_chain;
use crate::store;

/// Maximum number of documents read while following `parent_config` links.
pub const MAX_PARENT_DEPTH: usize = 10;

/// Resolve the document at `path` through its inheritance chain.
///
/// Returns `None` when any document in the chain is missing or malformed, or
/// when the chain still names a parent after [`MAX_PARENT_DEPTH`] reads. The
/// `parent_config` key itself never survives into the merged result. Parent
/// paths are used verbatim, not reinterpreted relative to the child.
pub fn resolve_document(path: &Path) -> Option<Value> {
    let mut chain = Vec::new();
    let mut next = path.to_path_buf();

    for depth in 1..=MAX_PARENT_DEPTH {
        let doc = store::read_document(&next)?;
        let parent = doc
            .get("parent_config")
            .and_then(Value::as_str)
            .map(PathBuf::from);
        chain.push(doc);

        match parent {
            None => break,
            Some(_) if depth == MAX_PARENT_DEPTH => {
                tracing::warn!(
                    path = %path.display(),
                    depth,
                    "parent_config chain still unresolved at depth limit"
                );
                return None;
            }
            Some(parent_path) => next = parent_path,
        }
    }

    // Child is last in merge order so its keys win.
    chain.reverse();
    let mut merged = merge_chain(chain);
    if let Some(map) = merged.as_object_mut() {
        map.remove("parent_config");
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, doc: &Value) -> PathBuf {
        let path = dir.path().join(name);
        store::write_document(&path, doc).unwrap();
        path
    }

    #[test]
    fn test_no_parent_resolves_to_itself() {
        let dir = TempDir::new().unwrap();
        let doc = json!({
            "devices": {"default": "roku", "roku": {"ip": "192.168.0.100"}},
            "projects": {"default": "p1", "p1": {"app_name": "app"}}
        });
        let path = write(&dir, "config.json", &doc);

        assert_eq!(resolve_document(&path), Some(doc));
    }

    #[test]
    fn test_missing_document_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_document(&dir.path().join("absent.json")).is_none());
    }

    #[test]
    fn test_child_wins_and_parent_fills_gaps() {
        let dir = TempDir::new().unwrap();
        let parent = json!({
            "devices": {"default": "roku", "roku": {"ip": "192.168.0.100", "user": "user"}},
            "keys": {"main": {"password": "pass"}}
        });
        let parent_path = write(&dir, "parent.json", &parent);
        let child = json!({
            "parent_config": parent_path.to_str().unwrap(),
            "devices": {"roku": {"ip": "192.168.0.200"}},
            "projects": {"default": "p1", "p1": {"app_name": "app"}}
        });
        let child_path = write(&dir, "child.json", &child);

        let merged = resolve_document(&child_path).unwrap();

        assert_eq!(merged["devices"]["roku"]["ip"], "192.168.0.200");
        assert_eq!(merged["devices"]["roku"]["user"], "user");
        assert_eq!(merged["devices"]["default"], "roku");
        assert_eq!(merged["keys"]["main"]["password"], "pass");
        assert_eq!(merged["projects"]["p1"]["app_name"], "app");
        assert!(merged.get("parent_config").is_none());
    }

    #[test]
    fn test_stages_merge_by_stage() {
        let dir = TempDir::new().unwrap();
        let parent = json!({
            "projects": {
                "default": "p1",
                "p1": {
                    "app_name": "app",
                    "stages": {
                        "default": "production",
                        "production": {"branch": "master"},
                        "staging": {"branch": "staging"}
                    }
                }
            }
        });
        let parent_path = write(&dir, "parent.json", &parent);
        let child = json!({
            "parent_config": parent_path.to_str().unwrap(),
            "projects": {"p1": {"stages": {"production": {"branch": "release"}}}}
        });
        let child_path = write(&dir, "child.json", &child);

        let merged = resolve_document(&child_path).unwrap();
        let stages = &merged["projects"]["p1"]["stages"];

        assert_eq!(stages["production"]["branch"], "release");
        assert_eq!(stages["staging"]["branch"], "staging");
        assert_eq!(stages["default"], "production");
    }

    #[test]
    fn test_self_referential_chain_cuts_off_at_depth_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loop.json");
        let doc = json!({
            "parent_config": path.to_str().unwrap(),
            "devices": {"default": "roku", "roku": {"ip": "192.168.0.100"}}
        });
        store::write_document(&path, &doc).unwrap();

        assert!(resolve_document(&path).is_none());
    }

    #[test]
    fn test_chain_exhausting_depth_limit_still_resolves() {
        let dir = TempDir::new().unwrap();
        let eldest = write(&dir, "doc0.json", &json!({"devices": {"default": "roku"}}));
        let mut parent = eldest;
        for i in 1..MAX_PARENT_DEPTH {
            parent = write(
                &dir,
                &format!("doc{i}.json"),
                &json!({"parent_config": parent.to_str().unwrap()}),
            );
        }

        let merged = resolve_document(&parent).unwrap();
        assert_eq!(merged["devices"]["default"], "roku");
    }

    #[test]
    fn test_missing_parent_in_chain_is_none() {
        let dir = TempDir::new().unwrap();
        let child = json!({
            "parent_config": dir.path().join("absent.json").to_str().unwrap(),
            "devices": {"default": "roku"}
        });
        let path = write(&dir, "child.json", &child);

        assert!(resolve_document(&path).is_none());
    }
}
