// jeopardy-lint/src/rounds.rs

//! Walk rounds -> categories -> questions and collect every issue found.
//!
//! A round whose `round.json` is missing, unparsable or misshapen contributes
//! only that finding; its categories are not visited. Categories are visited
//! even when a sibling is broken, and image references are checked even when
//! the category has other structural problems.

use serde_json::Value;
use std::{fs, path::{Path, PathBuf}};
use tracing::{debug, info};

use crate::{
    error::LintError,
    issue::Issue,
    json_file::validate_json_file,
    model::Category,
    structure::{validate_category_structure, validate_round_structure},
};

pub const ROUND_FILE: &str = "round.json";
pub const CATEGORY_FILE: &str = "cat.json";

#[derive(Clone, Debug, Default)]
pub struct RoundScan {
    pub rounds_checked: usize,
    pub issues: Vec<Issue>,
}

/// Round directories under `root`, sorted by name. Hidden and archive
/// directories are left out.
pub fn round_dirs(root: &Path, archive_dirs: &[String]) -> Result<Vec<(String, PathBuf)>, LintError> {
    let enumerate = |source: std::io::Error| LintError::Enumerate { path: root.to_path_buf(), source };
    let mut out = vec![];
    for entry in fs::read_dir(root).map_err(enumerate)? {
        let entry = entry.map_err(enumerate)?;
        let path = entry.path();
        if !path.is_dir() { continue; }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') { continue; }
        if archive_dirs.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
            info!(round = %name, "skipping archive directory");
            continue;
        }
        out.push((name, path));
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

pub fn check_round_consistency(rounds_dir: &Path, archive_dirs: &[String]) -> Result<RoundScan, LintError> {
    let mut scan = RoundScan::default();
    for (round_name, round_dir) in round_dirs(rounds_dir, archive_dirs)? {
        info!(round = %round_name, "validating round");
        scan.rounds_checked += 1;
        scan.issues.extend(check_round(&round_name, &round_dir));
    }
    Ok(scan)
}

fn check_round(round_name: &str, round_dir: &Path) -> Vec<Issue> {
    let mut issues = vec![];
    let round_json = round_dir.join(ROUND_FILE);
    if !round_json.exists() {
        issues.push(Issue::reference(format!("Missing round.json in {round_name}")));
        return issues;
    }
    let round = match validate_json_file(&round_json) {
        Ok(v) => v,
        Err(e) => {
            issues.push(Issue::invalid_json(&format!("{round_name}/{ROUND_FILE}"), &e));
            return issues;
        }
    };

    let round_issues = validate_round_structure(&round, round_name);
    if !round_issues.is_empty() {
        issues.extend(round_issues);
        return issues;
    }

    let categories: Vec<&str> = round["categories"].as_array().into_iter().flatten().filter_map(Value::as_str).collect();
    info!(round = %round_name, count = categories.len(), "categories: {}", preview(&categories));
    for category in categories {
        issues.extend(check_category(round_name, round_dir, category));
    }
    issues
}

fn preview(names: &[&str]) -> String {
    let head = names.iter().take(3).copied().collect::<Vec<_>>().join(", ");
    if names.len() > 3 { format!("{head}...") } else { head }
}

fn check_category(round_name: &str, round_dir: &Path, category: &str) -> Vec<Issue> {
    let mut issues = vec![];
    let cat_dir = round_dir.join(category);
    if !cat_dir.exists() {
        issues.push(Issue::reference(format!("Missing category directory: {round_name}/{category}")));
        return issues;
    }
    let cat_json = cat_dir.join(CATEGORY_FILE);
    if !cat_json.exists() {
        issues.push(Issue::reference(format!("Missing cat.json: {round_name}/{category}/{CATEGORY_FILE}")));
        return issues;
    }
    let cat = match validate_json_file(&cat_json) {
        Ok(v) => v,
        Err(e) => {
            issues.push(Issue::invalid_json(&format!("{round_name}/{category}/{CATEGORY_FILE}"), &e));
            return issues;
        }
    };

    issues.extend(validate_category_structure(&cat, round_name, category));

    let refs = image_refs(&cat);
    debug!(round = %round_name, category, images = refs.len(), "image references");
    issues.extend(missing_images(&refs, &cat_dir, round_name, category));
    issues
}

/// `(0-based question index, image path)` for every question naming an image.
/// A category that decodes strictly is read through its typed questions;
/// anything else falls back to the raw JSON so a broken sibling question does
/// not hide image references.
fn image_refs(cat: &Value) -> Vec<(usize, String)> {
    match Category::from_value(cat) {
        Ok(typed) => typed.questions.iter().enumerate()
            .filter_map(|(i, q)| q.image().map(|img| (i, img.to_string())))
            .collect(),
        Err(_) => cat.get("questions").and_then(Value::as_array).into_iter().flatten().enumerate()
            .filter_map(|(i, q)| q.get("image").and_then(Value::as_str).map(|img| (i, img.to_string())))
            .collect(),
    }
}

/// Image references resolve relative to the category directory and must name a file.
fn missing_images(refs: &[(usize, String)], cat_dir: &Path, round_name: &str, category: &str) -> Vec<Issue> {
    refs.iter()
        .filter(|(_, img)| !cat_dir.join(img).is_file())
        .map(|(i, img)| Issue::reference(format!("Missing image: {round_name}/{category}/{img} (question {})", i + 1)))
        .collect()
}
