use serde_json::Value;
use std::{fs, path::Path};

use crate::error::ReadError;

/// Read and parse a JSON file. I/O and parse failures stay distinct.
pub fn validate_json_file(path: &Path) -> Result<Value, ReadError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("round.json");
        fs::write(&p, r#"{"name":"Finals","categories":["math"]}"#).unwrap();
        let v = validate_json_file(&p).unwrap();
        assert_eq!(v["name"], "Finals");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("round.json");
        fs::write(&p, r#"{"name": "#).unwrap();
        assert!(matches!(validate_json_file(&p), Err(ReadError::Parse(_))));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
        assert!(err.to_string().starts_with("File read error: "));
    }
}
