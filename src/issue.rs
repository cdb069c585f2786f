use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ReadError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// File is not valid JSON.
    Parse,
    /// JSON does not have the required shape.
    Structural,
    /// A category directory, `cat.json` or image is missing on disk.
    Reference,
    /// File exists but could not be read.
    Io,
}

/// One violated invariant. Display prints only the message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn structural(message: impl Into<String>) -> Self { Self { kind: IssueKind::Structural, message: message.into() } }
    pub fn reference(message: impl Into<String>) -> Self { Self { kind: IssueKind::Reference, message: message.into() } }

    /// `Invalid JSON in {label}: {err}`, tagged by the failure kind.
    pub fn invalid_json(label: &str, err: &ReadError) -> Self {
        let kind = match err {
            ReadError::Io(_) => IssueKind::Io,
            ReadError::Parse(_) => IssueKind::Parse,
        };
        Self { kind, message: format!("Invalid JSON in {label}: {err}") }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.message) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_message_only() {
        let i = Issue::reference("Missing round.json in finals");
        assert_eq!(i.to_string(), "Missing round.json in finals");
        assert_eq!(i.kind, IssueKind::Reference);
    }

    #[test]
    fn invalid_json_keeps_kinds_apart() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let i = Issue::invalid_json("a/round.json", &ReadError::Parse(parse));
        assert_eq!(i.kind, IssueKind::Parse);
        assert!(i.message.starts_with("Invalid JSON in a/round.json: "));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let i = Issue::invalid_json("a/round.json", &ReadError::Io(io));
        assert_eq!(i.kind, IssueKind::Io);
        assert_eq!(i.message, "Invalid JSON in a/round.json: File read error: denied");
    }
}
