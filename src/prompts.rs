use globset::{Glob, GlobMatcher};
use serde_json::Value;
use std::{fs, io, path::{Path, PathBuf}};
use tracing::{debug, info};

use crate::{
    error::LintError,
    issue::Issue,
    json_file::validate_json_file,
    model::PROMPT_SET_SIZE,
};

const PROMPT_PREFIX: &str = "jeopardy_prompts_";

#[derive(Clone, Debug, Default)]
pub struct PromptScan {
    pub files_checked: usize,
    pub issues: Vec<Issue>,
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher, LintError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| LintError::Glob { pattern: pattern.to_string(), source })
}

/// Files directly inside `dir` whose name matches `pattern`, sorted. A missing
/// directory simply has no prompt files.
pub fn prompt_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, LintError> {
    let matcher = build_matcher(pattern)?;
    let rd = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no prompt directory");
            return Ok(vec![]);
        }
        Err(source) => return Err(LintError::Enumerate { path: dir.to_path_buf(), source }),
    };
    let mut files = vec![];
    for entry in rd {
        let entry = entry.map_err(|source| LintError::Enumerate { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(entry.file_name()) { files.push(path); }
    }
    files.sort();
    Ok(files)
}

pub fn check_prompt_files(dir: &Path, pattern: &str) -> Result<PromptScan, LintError> {
    let mut scan = PromptScan::default();
    for path in prompt_files(dir, pattern)? {
        scan.files_checked += 1;
        scan.issues.extend(check_prompt_file(&path));
    }
    Ok(scan)
}

fn default_name(path: &Path) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    stem.strip_prefix(PROMPT_PREFIX).map(str::to_string).unwrap_or(stem)
}

pub fn check_prompt_file(path: &Path) -> Vec<Issue> {
    let file = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let data = match validate_json_file(path) {
        Ok(v) => v,
        Err(e) => return vec![Issue::invalid_json(&file, &e)],
    };
    let Some(obj) = data.as_object() else {
        return vec![Issue::structural(format!("Error processing {file}: Root must be an object"))];
    };
    let questions: &[Value] = match obj.get("questions") {
        None => &[],
        Some(Value::Array(qs)) => qs.as_slice(),
        Some(_) => return vec![Issue::structural(format!("Error processing {file}: 'questions' must be an array"))],
    };
    let name = obj.get("name").and_then(Value::as_str).map(str::to_string).unwrap_or_else(|| default_name(path));

    let mut issues = vec![];
    if questions.iter().any(|q| q.get("image").is_some()) {
        issues.push(Issue::structural(format!("Unexpected images found in {file}")));
    }
    if questions.len() != PROMPT_SET_SIZE {
        issues.push(Issue::structural(format!("{file}: Expected {PROMPT_SET_SIZE} questions, found {}", questions.len())));
    }
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        let Some(q) = q.as_object() else {
            issues.push(Issue::structural(format!("{file}: Question {n} must be an object")));
            continue;
        };
        if !q.contains_key("question") || !q.contains_key("answer") {
            issues.push(Issue::structural(format!("{file}: Question {n} missing required fields")));
        }
        if q.contains_key("image") {
            issues.push(Issue::structural(format!("{file}: Question {n} should not have image field")));
        }
    }

    info!(name = %name, count = questions.len(), issues = issues.len(), "prompt set checked");
    issues
}
