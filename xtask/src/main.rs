use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::{fs, path::{Path, PathBuf}};

#[derive(Parser)]
#[command(name = "xtask", about = "jeopardy-lint workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate one content file against schemas/<kind>.schema.json
    ValidateSchema {
        #[arg(long, value_enum)]
        kind: Kind,
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind { Round, Category, Prompts }

impl Kind {
    fn schema(self) -> &'static str {
        match self {
            Kind::Round => include_str!("../../schemas/round.schema.json"),
            Kind::Category => include_str!("../../schemas/category.schema.json"),
            Kind::Prompts => include_str!("../../schemas/prompts.schema.json"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::ValidateSchema { kind, file } => {
            let errors = schema_errors(kind, &file)?;
            if !errors.is_empty() {
                eprintln!("Invalid: {}", file.display());
                for e in errors {
                    eprintln!("- {}", e);
                }
                std::process::exit(1);
            }
            println!("OK: {}", file.display());
            Ok(())
        }
    }
}

fn schema_errors(kind: Kind, path: &Path) -> Result<Vec<String>> {
    let schema: serde_json::Value = serde_json::from_str(kind.schema()).context("parse bundled schema")?;
    let compiled = jsonschema::validator_for(&schema)?;
    let data_text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&data_text).with_context(|| "parse json")?;
    Ok(compiled.iter_errors(&data).map(|e| e.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_json(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, text).unwrap();
        p
    }

    #[test]
    fn bundled_schemas_compile() {
        for k in [Kind::Round, Kind::Category, Kind::Prompts] {
            let v: serde_json::Value = serde_json::from_str(k.schema()).unwrap();
            assert!(jsonschema::validator_for(&v).is_ok(), "{k:?}");
        }
    }

    #[test]
    fn category_with_both_answer_and_image_fails() {
        let dir = TempDir::new().unwrap();
        let p = tmp_json(&dir, "cat.json", r#"{"name":"M","questions":[{"question":"q","answer":"a","image":"i.png"}]}"#);
        assert!(!schema_errors(Kind::Category, &p).unwrap().is_empty());
        let p = tmp_json(&dir, "cat-ok.json", r#"{"name":"M","questions":[{"question":"q","image":"i.png"}]}"#);
        assert!(schema_errors(Kind::Category, &p).unwrap().is_empty());
    }

    #[test]
    fn round_needs_categories() {
        let dir = TempDir::new().unwrap();
        let p = tmp_json(&dir, "round.json", r#"{"name":"R","categories":[]}"#);
        assert!(!schema_errors(Kind::Round, &p).unwrap().is_empty());
    }
}
