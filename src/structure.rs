// jeopardy-lint/src/structure.rs

//! Shape checks for `round.json`, `cat.json` and the questions inside it.
//!
//! Each check returns every defect it finds, in field order, rather than
//! stopping at the first one. Only a non-object root short-circuits.

use serde_json::{Map, Value};

use crate::issue::Issue;

fn require_fields(obj: &Map<String, Value>, fields: &[&str], label: &str, issues: &mut Vec<Issue>) {
    for field in fields {
        if !obj.contains_key(*field) {
            issues.push(Issue::structural(format!("{label}: Missing required field '{field}'")));
        }
    }
}

pub fn validate_round_structure(value: &Value, round_name: &str) -> Vec<Issue> {
    let label = format!("{round_name}/round.json");
    let mut issues = vec![];
    let Some(obj) = value.as_object() else {
        issues.push(Issue::structural(format!("{label}: Root must be an object")));
        return issues;
    };
    require_fields(obj, &["name", "categories"], &label, &mut issues);

    match obj.get("categories") {
        None => {}
        Some(Value::Array(cats)) if cats.is_empty() => {
            issues.push(Issue::structural(format!("{label}: 'categories' array is empty")));
        }
        Some(Value::Array(cats)) => {
            for (i, cat) in cats.iter().enumerate() {
                match cat {
                    Value::String(s) if s.trim().is_empty() => issues.push(Issue::structural(
                        format!("{label}: Category {} must be a non-empty string", i + 1),
                    )),
                    Value::String(_) => {}
                    other => issues.push(Issue::structural(format!("{label}: Category '{other}' must be a string"))),
                }
            }
        }
        Some(_) => issues.push(Issue::structural(format!("{label}: 'categories' must be an array"))),
    }
    issues
}

pub fn validate_category_structure(value: &Value, round_name: &str, cat_name: &str) -> Vec<Issue> {
    let label = format!("{round_name}/{cat_name}/cat.json");
    let mut issues = vec![];
    let Some(obj) = value.as_object() else {
        issues.push(Issue::structural(format!("{label}: Root must be an object")));
        return issues;
    };
    require_fields(obj, &["name", "questions"], &label, &mut issues);

    match obj.get("questions") {
        None => {}
        Some(Value::Array(qs)) if qs.is_empty() => {
            issues.push(Issue::structural(format!("{label}: 'questions' array is empty")));
        }
        Some(Value::Array(qs)) => {
            for (i, q) in qs.iter().enumerate() {
                issues.extend(validate_question_structure(q, round_name, cat_name, i));
            }
        }
        Some(_) => issues.push(Issue::structural(format!("{label}: 'questions' must be an array"))),
    }
    issues
}

/// `index` is 0-based; messages use the 1-based position.
pub fn validate_question_structure(value: &Value, round_name: &str, cat_name: &str, index: usize) -> Vec<Issue> {
    let label = format!("{round_name}/{cat_name}/cat.json: Question {}", index + 1);
    let mut issues = vec![];
    let Some(obj) = value.as_object() else {
        issues.push(Issue::structural(format!("{label} must be an object")));
        return issues;
    };

    match obj.get("question") {
        None => issues.push(Issue::structural(format!("{label} missing 'question' field"))),
        Some(Value::String(_)) => {}
        Some(_) => issues.push(Issue::structural(format!("{label} 'question' must be a string"))),
    }

    let answer = obj.get("answer");
    let image = obj.get("image");
    match (answer, image) {
        (None, None) => issues.push(Issue::structural(format!("{label} must have either 'answer' or 'image'"))),
        (Some(_), Some(_)) => issues.push(Issue::structural(format!("{label} cannot have both 'answer' and 'image'"))),
        _ => {}
    }
    if answer.is_some_and(|a| !a.is_string()) {
        issues.push(Issue::structural(format!("{label} 'answer' must be a string")));
    }
    match image {
        Some(Value::String(i)) if i.trim().is_empty() => {
            issues.push(Issue::structural(format!("{label} 'image' must be a non-empty string")));
        }
        Some(Value::String(_)) | None => {}
        Some(_) => issues.push(Issue::structural(format!("{label} 'image' must be a string"))),
    }
    issues
}
