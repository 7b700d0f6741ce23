//! Document store I/O.
//!
//! Reads and rewrites persisted configuration documents. A missing resource or
//! malformed JSON yields "no document" (`None`) rather than a partially-built
//! structure; callers decide what that means for them.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Read and parse the document at `path`.
///
/// Returns `None` when the resource is absent/unreadable or the content is not
/// valid JSON. The underlying handle is scoped to this call and released on
/// every exit path.
pub fn read_document(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(doc) => Some(doc),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "document failed to parse");
            None
        }
    }
}

/// Serialize `doc` with stable two-space pretty-printing and write it to
/// `path` in full, replacing any previous content.
pub fn write_document(path: &Path, doc: &Value) -> io::Result<()> {
    let mut text = serde_json::to_string_pretty(doc)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    text.push('\n');
    fs::write(path, text)
}
