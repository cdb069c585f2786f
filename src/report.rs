use serde::{Deserialize, Serialize};
use std::{fmt::Write as _, path::Path};

use crate::{
    config::{Config, ReportFormat},
    error::LintError,
    issue::Issue,
    manifest::validate_manifest,
    prompts::check_prompt_files,
    rounds::check_round_consistency,
};

/// Outcome of one full run: rounds, then prompt files, then the manifest.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Report {
    pub rounds_checked: usize,
    pub prompt_files_checked: usize,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn has_issues(&self) -> bool { !self.issues.is_empty() }

    /// Issues are informational unless `fail_on_issues` is set.
    pub fn fails(&self, fail_on_issues: bool) -> bool { fail_on_issues && self.has_issues() }

    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.render_text(),
            ReportFormat::Json => serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
        }
    }

    fn render_text(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "Validation results:");
        let _ = writeln!(s, "Total rounds checked: {}", self.rounds_checked);
        let _ = writeln!(s, "Total prompt files checked: {}", self.prompt_files_checked);
        if self.has_issues() {
            let _ = writeln!(s, "\nFound {} issues:", self.issues.len());
            for issue in &self.issues { let _ = writeln!(s, "  - {issue}"); }
            let _ = writeln!(s, "\nPlease fix the above issues before deployment.");
        } else {
            let _ = writeln!(s, "\nAll validations passed! All rounds are consistent, JSON is valid, and all referenced images exist.");
        }
        let _ = write!(s, "\nSummary: {} issues detected", self.issues.len());
        s
    }
}

/// Run every configured check and gather the results in discovery order.
pub fn run_checks(cfg: &Config) -> Result<Report, LintError> {
    let content = &cfg.content;
    let rounds = check_round_consistency(&content.rounds_dir, &content.archive_dirs)?;
    let prompts = check_prompt_files(&content.prompts_dir, &content.prompt_glob)?;
    let mut issues = rounds.issues;
    issues.extend(prompts.issues);
    if let Some(manifest) = content.manifest.as_deref() {
        issues.extend(validate_manifest(manifest, &content.rounds_dir));
    }
    Ok(Report { rounds_checked: rounds.rounds_checked, prompt_files_checked: prompts.files_checked, issues })
}

/// Convenience for callers that only have the two roots.
pub fn check_dataset(rounds_dir: &Path, prompts_dir: &Path) -> Result<Report, LintError> {
    let mut cfg = Config::default();
    cfg.content.rounds_dir = rounds_dir.to_path_buf();
    cfg.content.prompts_dir = prompts_dir.to_path_buf();
    run_checks(&cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_issues_and_summary() {
        let r = Report {
            rounds_checked: 2,
            prompt_files_checked: 1,
            issues: vec![Issue::reference("Missing round.json in r")],
        };
        let text = r.render(ReportFormat::Text);
        assert!(text.contains("Total rounds checked: 2"));
        assert!(text.contains("Found 1 issues:\n  - Missing round.json in r"));
        assert!(text.ends_with("Summary: 1 issues detected"));
    }

    #[test]
    fn clean_text_report() {
        let text = Report::default().render(ReportFormat::Text);
        assert!(text.contains("All validations passed!"));
        assert!(!Report::default().has_issues());
    }

    #[test]
    fn latest_report_decides_failure() {
        let mut report = Report { issues: vec![Issue::structural("x")], ..Default::default() };
        assert!(report.fails(true));
        assert!(!report.fails(false));
        let mut rerun = || { report = Report::default(); };
        rerun();
        assert!(!report.fails(true));
    }

    #[test]
    fn json_report_is_machine_readable() {
        let r = Report { rounds_checked: 1, prompt_files_checked: 0, issues: vec![Issue::structural("x")] };
        let v: serde_json::Value = serde_json::from_str(&r.render(ReportFormat::Json)).unwrap();
        assert_eq!(v["rounds_checked"], 1);
        assert_eq!(v["issues"][0]["kind"], "structural");
        assert_eq!(v["issues"][0]["message"], "x");
    }
}
