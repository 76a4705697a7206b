//! Reading documents and handler lists from disk.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised before compilation starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Parse a YAML or JSON document (JSON is valid YAML).
pub fn parse_document(input: &str, path: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(input).map_err(|e| LoadError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Load a document from a file path.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let display = path.display().to_string();
    let content = read(path)?;
    let document = parse_document(&content, &display)?;
    if !document.is_object() {
        return Err(LoadError::Parse {
            path: display,
            message: "document root must be an object".into(),
        });
    }
    Ok(document)
}

/// Parse a handler list: one name per line, `#` starts a comment.
pub fn parse_handler_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a handler list from a file path.
pub fn load_handler_list(path: &Path) -> Result<Vec<String>, LoadError> {
    Ok(parse_handler_list(&read(path)?))
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_yaml_and_json() {
        let yaml = parse_document("openapi: \"3.0.3\"\npaths: {}\n", "a.yaml").unwrap();
        let json = parse_document(r#"{"openapi": "3.0.3", "paths": {}}"#, "a.json").unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = parse_document("paths: [unclosed", "broken.yaml").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse broken.yaml"));
    }

    #[test]
    fn scalar_root_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "just a string").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(err.to_string().contains("root must be an object"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_document(Path::new("/nonexistent/api.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn handler_list_skips_comments_and_blanks() {
        let names = parse_handler_list("# documents\ngetDocument\n\n  updateDocument  # v2\n");
        assert_eq!(names, vec!["getDocument", "updateDocument"]);
    }
}
