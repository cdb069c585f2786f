use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `round.json`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// `cat.json`. Metadata fields are optional and only feed the manifest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub licence: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// What the host reveals: a text answer or an image. Never both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reveal {
    Answer(String),
    Image(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct Question {
    pub question: String,
    pub reveal: Reveal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawQuestion {
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;
    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let reveal = match (raw.answer, raw.image) {
            (Some(a), None) => Reveal::Answer(a),
            (None, Some(i)) => Reveal::Image(i),
            (Some(_), Some(_)) => return Err("cannot have both 'answer' and 'image'".into()),
            (None, None) => return Err("must have either 'answer' or 'image'".into()),
        };
        Ok(Self { question: raw.question, reveal })
    }
}

impl From<Question> for RawQuestion {
    fn from(q: Question) -> Self {
        let (answer, image) = match q.reveal {
            Reveal::Answer(a) => (Some(a), None),
            Reveal::Image(i) => (None, Some(i)),
        };
        Self { question: q.question, answer, image }
    }
}

impl Question {
    pub fn image(&self) -> Option<&str> {
        match &self.reveal { Reveal::Image(i) => Some(i), Reveal::Answer(_) => None }
    }
}

/// Metadata of a `cat.json`, read without touching its questions so a flawed
/// question does not hide the category's language, difficulty or author.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryMeta {
    pub name: Option<String>,
    pub lang: Option<String>,
    pub difficulty: Option<String>,
    pub author: Option<String>,
}

/// Questions per `jeopardy_prompts_*.json` set.
pub const PROMPT_SET_SIZE: usize = 5;

impl Round {
    /// Strict decode; call after the granular shape checks came back clean.
    pub fn from_value(v: &Value) -> Result<Self, serde_json::Error> { Self::deserialize(v) }
}

impl Category {
    pub fn from_value(v: &Value) -> Result<Self, serde_json::Error> { Self::deserialize(v) }
}

impl CategoryMeta {
    /// Non-string metadata values are treated as absent.
    pub fn from_value(v: &Value) -> Self {
        let field = |k: &str| v.get(k).and_then(Value::as_str).map(str::to_string);
        Self { name: field("name"), lang: field("lang"), difficulty: field("difficulty"), author: field("author") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_decodes_into_tagged_reveal() {
        let q: Question = serde_json::from_value(json!({"question": "2+2?", "answer": "4"})).unwrap();
        assert_eq!(q.reveal, Reveal::Answer("4".into()));
        let q: Question = serde_json::from_value(json!({"question": "who?", "image": "a.png"})).unwrap();
        assert_eq!(q.image(), Some("a.png"));
    }

    #[test]
    fn question_rejects_both_and_neither() {
        assert!(serde_json::from_value::<Question>(json!({"question": "q", "answer": "a", "image": "i"})).is_err());
        assert!(serde_json::from_value::<Question>(json!({"question": "q"})).is_err());
    }

    #[test]
    fn question_serializes_flat() {
        let q = Question { question: "q".into(), reveal: Reveal::Image("i.png".into()) };
        assert_eq!(serde_json::to_value(&q).unwrap(), json!({"question": "q", "image": "i.png"}));
    }

    #[test]
    fn category_metadata_is_optional() {
        let c = Category::from_value(&json!({"name": "Math", "lang": "de", "questions": [{"question": "q", "answer": "a"}]})).unwrap();
        assert_eq!(c.lang.as_deref(), Some("de"));
        assert!(c.author.is_none());
    }

    #[test]
    fn category_meta_ignores_broken_questions() {
        let m = CategoryMeta::from_value(&json!({
            "name": "Math", "lang": "de", "difficulty": 3, "author": "bob",
            "questions": [{"question": "a", "answer": "b"}, {"question": "b"}]
        }));
        assert!(Category::from_value(&json!({"name": "Math", "questions": [{"question": "b"}]})).is_err());
        assert_eq!(m.lang.as_deref(), Some("de"));
        assert_eq!(m.author.as_deref(), Some("bob"));
        assert!(m.difficulty.is_none());
    }
}
