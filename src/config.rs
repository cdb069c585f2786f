// jeopardy-lint/src/config.rs

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use tracing::{debug, warn};

/// Config is merged: system -> user -> workspace -> command line.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub report: ReportConfig,
    pub manifest: ManifestConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    pub rounds_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub prompt_glob: String,
    /// Round-level directories skipped without a report (case-insensitive).
    pub archive_dirs: Vec<String>,
    /// Manifest to check alongside the rounds; unchecked when unset.
    pub manifest: Option<PathBuf>,
}
impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            rounds_dir: PathBuf::from("src/assets"),
            prompts_dir: PathBuf::from("cats/hackerjeopardy"),
            prompt_glob: "jeopardy_prompts_*.json".into(),
            archive_dirs: vec!["archiv".into()],
            manifest: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat { #[default] Text, Json }

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
    pub fail_on_issues: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    pub output: Option<PathBuf>,  // defaults to {rounds_dir}/rounds-manifest.json
    pub version: Option<String>,
}

/// A partially specified layer; absent keys leave the lower layer alone.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct Layer {
    content: ContentLayer,
    report: ReportLayer,
    manifest: ManifestConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct ContentLayer {
    rounds_dir: Option<PathBuf>,
    prompts_dir: Option<PathBuf>,
    prompt_glob: Option<String>,
    archive_dirs: Option<Vec<String>>,
    manifest: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct ReportLayer {
    format: Option<ReportFormat>,
    fail_on_issues: Option<bool>,
}

fn merge(a: &mut Config, b: &Layer) {
    let c = &b.content;
    if let Some(v) = &c.rounds_dir { a.content.rounds_dir = v.clone(); }
    if let Some(v) = &c.prompts_dir { a.content.prompts_dir = v.clone(); }
    if let Some(v) = &c.prompt_glob { a.content.prompt_glob = v.clone(); }
    if let Some(v) = &c.archive_dirs { a.content.archive_dirs = v.clone(); }
    if c.manifest.is_some() { a.content.manifest = c.manifest.clone(); }

    if b.report.format.is_some() { a.report.format = b.report.format; }
    if let Some(v) = b.report.fail_on_issues { a.report.fail_on_issues = v; }

    if b.manifest.output.is_some() { a.manifest.output = b.manifest.output.clone(); }
    if b.manifest.version.is_some() { a.manifest.version = b.manifest.version.clone(); }
}

/// Relative content paths in a workspace file resolve against the workspace.
fn anchor(layer: &mut Layer, root: &Path) {
    for p in [&mut layer.content.rounds_dir, &mut layer.content.prompts_dir, &mut layer.content.manifest, &mut layer.manifest.output] {
        if let Some(path) = p.as_mut() {
            if path.is_relative() { *path = root.join(&*path); }
        }
    }
}

/// Overrides coming from the command line; applied last.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub rounds_dir: Option<PathBuf>,
    pub prompts_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub fail_on_issues: bool,
}

#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub system_path: PathBuf,
    pub user_path: Option<PathBuf>,
    pub workspace_root: PathBuf,
    pub workspace_path: PathBuf,
}

impl ConfigSources {
    pub fn for_workspace(workspace_root: impl AsRef<Path>) -> Self {
        let system_path = if cfg!(target_os = "windows") {
            PathBuf::from(r"C:\ProgramData\jeopardy-lint\config.toml")
        } else {
            PathBuf::from("/etc/jeopardy-lint/config.toml")
        };
        let user_path = ProjectDirs::from("org", "hackerjeopardy", "jeopardy-lint").map(|p| p.config_dir().join("config.toml"));
        let workspace_root = workspace_root.as_ref().to_path_buf();
        let workspace_path = workspace_root.join(".jeopardy-lint.toml");
        Self { system_path, user_path, workspace_root, workspace_path }
    }

    fn read_file(path: &Path) -> Option<Layer> {
        let text = fs::read_to_string(path).ok()?;
        match toml::from_str::<Layer>(&text) {
            Ok(l) => { debug!(path = %path.display(), "loaded config layer"); Some(l) }
            Err(e) => { warn!(path = %path.display(), error = %e, "ignoring unparsable config"); None }
        }
    }

    /// Merge every layer that exists; content paths default to the workspace.
    pub fn load(&self, overrides: &Overrides) -> Config {
        let mut merged = Config::default();
        anchor_defaults(&mut merged, &self.workspace_root);
        if let Some(sys) = Self::read_file(&self.system_path) { merge(&mut merged, &sys); }
        if let Some(usr) = self.user_path.as_deref().and_then(Self::read_file) { merge(&mut merged, &usr); }
        if let Some(mut ws) = Self::read_file(&self.workspace_path) {
            anchor(&mut ws, &self.workspace_root);
            merge(&mut merged, &ws);
        }
        apply_overrides(&mut merged, overrides);
        merged
    }

    /// Persist `cfg` as the workspace file (used by `init`).
    pub fn write_workspace(&self, cfg: &Config) -> Result<PathBuf> {
        let text = toml::to_string_pretty(cfg).context("serialize toml")?;
        fs::write(&self.workspace_path, text).with_context(|| format!("write {}", self.workspace_path.display()))?;
        Ok(self.workspace_path.clone())
    }
}

fn anchor_defaults(cfg: &mut Config, root: &Path) {
    cfg.content.rounds_dir = root.join(&cfg.content.rounds_dir);
    cfg.content.prompts_dir = root.join(&cfg.content.prompts_dir);
}

fn apply_overrides(cfg: &mut Config, o: &Overrides) {
    if let Some(v) = &o.rounds_dir { cfg.content.rounds_dir = v.clone(); }
    if let Some(v) = &o.prompts_dir { cfg.content.prompts_dir = v.clone(); }
    if o.manifest.is_some() { cfg.content.manifest = o.manifest.clone(); }
    if o.format.is_some() { cfg.report.format = o.format; }
    cfg.report.fail_on_issues |= o.fail_on_issues;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(root: &Path) -> ConfigSources {
        ConfigSources {
            system_path: root.join("system.toml"),
            user_path: None,
            workspace_root: root.to_path_buf(),
            workspace_path: root.join(".jeopardy-lint.toml"),
        }
    }

    #[test]
    fn defaults_resolve_against_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = sources(dir.path()).load(&Overrides::default());
        assert_eq!(cfg.content.rounds_dir, dir.path().join("src/assets"));
        assert_eq!(cfg.content.prompts_dir, dir.path().join("cats/hackerjeopardy"));
        assert_eq!(cfg.content.prompt_glob, "jeopardy_prompts_*.json");
        assert_eq!(cfg.content.archive_dirs, vec!["archiv".to_string()]);
        assert!(!cfg.report.fail_on_issues);
    }

    #[test]
    fn workspace_overrides_system_and_cli_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("system.toml"), "[content]\nprompt_glob = \"p_*.json\"\n[report]\nfail_on_issues = true\n").unwrap();
        fs::write(dir.path().join(".jeopardy-lint.toml"), "[content]\nrounds_dir = \"rounds\"\narchive_dirs = []\n[report]\nformat = \"json\"\n").unwrap();
        let src = sources(dir.path());

        let cfg = src.load(&Overrides::default());
        assert_eq!(cfg.content.prompt_glob, "p_*.json");
        assert_eq!(cfg.content.rounds_dir, dir.path().join("rounds"));
        assert!(cfg.content.archive_dirs.is_empty());
        assert_eq!(cfg.report.format, Some(ReportFormat::Json));
        assert!(cfg.report.fail_on_issues);

        let cli = Overrides { rounds_dir: Some(PathBuf::from("/data/rounds")), format: Some(ReportFormat::Text), ..Default::default() };
        let cfg = src.load(&cli);
        assert_eq!(cfg.content.rounds_dir, PathBuf::from("/data/rounds"));
        assert_eq!(cfg.report.format, Some(ReportFormat::Text));
    }

    #[test]
    fn broken_layer_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".jeopardy-lint.toml"), "[content\nrounds_dir = ").unwrap();
        let cfg = sources(dir.path()).load(&Overrides::default());
        assert_eq!(cfg.content.rounds_dir, dir.path().join("src/assets"));
    }

    #[test]
    fn written_workspace_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let src = sources(dir.path());
        let mut cfg = Config::default();
        cfg.content.rounds_dir = PathBuf::from("content/rounds");
        cfg.manifest.version = Some("2".into());
        src.write_workspace(&cfg).unwrap();
        let loaded = src.load(&Overrides::default());
        assert_eq!(loaded.content.rounds_dir, dir.path().join("content/rounds"));
        assert_eq!(loaded.manifest.version.as_deref(), Some("2"));
    }
}
