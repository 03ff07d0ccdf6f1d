use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, instrument, trace};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse every `---` separated document in `text`.
///
/// Empty documents are dropped so callers only see documents that carry content.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    let mut documents = Vec::new();
    for deserializer in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            trace!("Skipping empty document");
            continue;
        }
        documents.push(value);
    }

    Ok(documents)
}

#[instrument]
pub fn load_file(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_owned(),
        source,
    })?;

    let documents = parse_documents(&text).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })?;

    debug!(count = documents.len(), "Loaded documents");

    Ok(documents)
}

/// Load all documents from `paths`, in order.
///
/// Fails on the first file that cannot be read, before anything is returned.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.extend(load_file(path.as_ref())?);
    }

    Ok(documents)
}

/// Walk a chain of mapping keys, returning `None` as soon as one is missing.
pub fn get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |value, key| value.get(*key))
}

pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    get(value, path).and_then(Value::as_str)
}

pub fn kind(value: &Value) -> Option<&str> {
    str_at(value, &["kind"])
}

pub fn name(value: &Value) -> Option<&str> {
    str_at(value, &["metadata", "name"])
}

/// Read `key` as a list of strings.
///
/// Anything that is not a sequence reads as empty, non-string entries are skipped.
pub fn str_list<'a>(value: &'a Value, key: &str) -> Vec<&'a str> {
    value
        .get(key)
        .and_then(Value::as_sequence)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

pub fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn skips_empty_documents() {
        let documents = parse_documents("---\n---\nkind: ConfigMap\n---\n").unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(kind(&documents[0]), Some("ConfigMap"));
    }

    #[test]
    fn accessors_default_on_missing_or_mistyped_fields() {
        let documents = parse_documents(
            "kind: 3\nmetadata: []\nrules:\n  verbs: get\napiGroups: ['', 7, apps]\n",
        )
        .unwrap();
        let doc = &documents[0];

        assert_eq!(kind(doc), None);
        assert_eq!(name(doc), None);
        assert!(list(doc, "rules").is_empty());
        assert!(list(doc, "missing").is_empty());
        assert!(str_list(&doc["rules"], "verbs").is_empty());
        assert_eq!(str_list(doc, "apiGroups"), vec!["", "apps"]);
    }

    #[test]
    fn nested_lookup() {
        let documents = parse_documents("metadata:\n  name: antrea-config\n").unwrap();

        assert_eq!(name(&documents[0]), Some("antrea-config"));
        assert_eq!(str_at(&documents[0], &["metadata", "namespace"]), None);
    }

    #[test]
    fn load_files_keeps_file_order() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        write!(first, "kind: A\n---\nkind: B\n").unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, "kind: C\n").unwrap();

        let documents = load_files(&[first.path(), second.path()]).unwrap();
        let kinds: Vec<_> = documents.iter().filter_map(kind).collect();

        assert_eq!(kinds, vec!["A", "B", "C"]);
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let error = load_file(&path).unwrap_err();

        assert!(matches!(error, Error::FileAccess { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "kind: [unterminated\n").unwrap();

        let error = load_file(file.path()).unwrap_err();

        assert!(matches!(error, Error::Parse { .. }));
    }
}
