// jeopardy-lint/src/manifest.rs

//! `rounds-manifest.json`: the index the game client reads to list rounds.
//!
//! [`validate_manifest`] checks an existing manifest against the rounds on
//! disk; [`build_manifest`] derives a fresh one from structurally valid rounds.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeSet, fs, path::{Path, PathBuf}, time::SystemTime};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    error::LintError,
    issue::Issue,
    json_file::validate_json_file,
    model::{CategoryMeta, Round},
    rounds::{round_dirs, CATEGORY_FILE, ROUND_FILE},
    structure::validate_round_structure,
};

pub const MANIFEST_FILE: &str = "rounds-manifest.json";
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundMetadata {
    pub id: String,
    pub name: String,
    pub language: String,
    pub difficulty: String,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub last_modified: String,
    pub size: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentManifest {
    pub rounds: Vec<RoundMetadata>,
    pub last_updated: String,
    pub total_rounds: usize,
    pub total_size: u64,
    pub version: String,
}

pub fn validate_manifest(path: &Path, rounds_dir: &Path) -> Vec<Issue> {
    let file = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string());
    if !path.exists() {
        return vec![Issue::reference(format!("{file} not found"))];
    }
    let data = match validate_json_file(path) {
        Ok(v) => v,
        Err(e) => return vec![Issue::invalid_json(&file, &e)],
    };
    let Some(rounds) = data.get("rounds").and_then(Value::as_array) else {
        return vec![Issue::structural(format!("{file}: 'rounds' must be an array"))];
    };
    if rounds.is_empty() { warn!(manifest = %file, "manifest contains no rounds"); }

    let mut issues = vec![];
    for (index, round) in rounds.iter().enumerate() {
        let id = round.get("id").and_then(Value::as_str).filter(|s| !s.is_empty());
        if id.is_none() { issues.push(Issue::structural(format!("{file}: Round {index} missing id"))); }
        if round.get("name").and_then(Value::as_str).is_none_or(str::is_empty) {
            issues.push(Issue::structural(format!("{file}: Round {index} missing name")));
        }
        if let Some(id) = id {
            if !rounds_dir.join(id).is_dir() {
                issues.push(Issue::reference(format!("{file}: Round '{id}' has no directory")));
            }
        }
    }
    info!(manifest = %file, rounds = rounds.len(), "manifest checked");
    issues
}

fn rfc3339(t: SystemTime) -> String { DateTime::<Utc>::from(t).to_rfc3339() }

/// Total bytes and newest mtime of every file below `dir`.
fn disk_usage(dir: &Path) -> (u64, Option<SystemTime>) {
    let mut size = 0;
    let mut newest: Option<SystemTime> = None;
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() { continue; }
        let Ok(md) = entry.metadata() else { continue };
        size += md.len();
        if let Ok(m) = md.modified() { newest = Some(newest.map_or(m, |n| n.max(m))); }
    }
    (size, newest)
}

/// Single shared difficulty, `mixed` when categories disagree or say nothing.
fn overall_difficulty(cats: &[CategoryMeta]) -> String {
    let set: BTreeSet<&str> = cats.iter().filter_map(|c| c.difficulty.as_deref()).collect();
    match set.len() {
        1 => set.into_iter().next().map(str::to_string).unwrap_or_default(),
        _ => "mixed".into(),
    }
}

fn round_metadata(id: &str, dir: &Path) -> Option<RoundMetadata> {
    let value = match validate_json_file(&dir.join(ROUND_FILE)) {
        Ok(v) => v,
        Err(e) => { warn!(round = %id, error = %e, "skipping round without readable round.json"); return None; }
    };
    if !validate_round_structure(&value, id).is_empty() {
        warn!(round = %id, "skipping misshapen round");
        return None;
    }
    let round = Round::from_value(&value).ok()?;
    let cats: Vec<CategoryMeta> = round.categories.iter()
        .filter_map(|c| validate_json_file(&dir.join(c).join(CATEGORY_FILE)).ok())
        .map(|v| CategoryMeta::from_value(&v))
        .collect();
    let (size, newest) = disk_usage(dir);
    Some(RoundMetadata {
        id: id.to_string(),
        name: round.name,
        language: cats.iter().find_map(|c| c.lang.clone()).unwrap_or_else(|| "en".into()),
        difficulty: overall_difficulty(&cats),
        categories: round.categories,
        author: cats.iter().find_map(|c| c.author.clone()),
        last_modified: rfc3339(newest.unwrap_or(SystemTime::UNIX_EPOCH)),
        size,
    })
}

pub fn build_manifest(rounds_dir: &Path, archive_dirs: &[String], version: &str) -> Result<ContentManifest, LintError> {
    let rounds: Vec<RoundMetadata> = round_dirs(rounds_dir, archive_dirs)?
        .into_iter()
        .filter_map(|(id, dir)| round_metadata(&id, &dir))
        .collect();
    Ok(ContentManifest {
        total_rounds: rounds.len(),
        total_size: rounds.iter().map(|r| r.size).sum(),
        rounds,
        last_updated: Utc::now().to_rfc3339(),
        version: version.to_string(),
    })
}

pub fn write_manifest(manifest: &ContentManifest, out: &Path) -> Result<PathBuf> {
    if let Some(dir) = out.parent() { fs::create_dir_all(dir)?; }
    let text = serde_json::to_string_pretty(manifest).context("serialize manifest")?;
    fs::write(out, text).map_err(|source| LintError::Write { path: out.to_path_buf(), source })?;
    info!(path = %out.display(), rounds = manifest.total_rounds, "manifest written");
    Ok(out.to_path_buf())
}
