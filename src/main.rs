// jeopardy-lint/src/main.rs

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;

use jeopardy_lint::{
    config::{ConfigSources, Overrides, ReportFormat},
    manifest::{build_manifest, write_manifest, DEFAULT_VERSION, MANIFEST_FILE},
    report::run_checks,
    watch::watch_paths,
    Config,
};

#[derive(Parser)]
#[command(name = "jeopardy-lint", version, about = "Check Hacker Jeopardy rounds, categories and prompt sets")]
struct Cli {
    /// Root used to find `.jeopardy-lint.toml` and resolve default content paths
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate rounds, categories, images and prompt files (default)
    Check(CheckArgs),
    /// Generate rounds-manifest.json from the rounds on disk
    Manifest {
        #[arg(long)]
        rounds_dir: Option<PathBuf>,
        /// Output file (default: <rounds-dir>/rounds-manifest.json)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long = "manifest-version")]
        manifest_version: Option<String>,
    },
    /// Write the effective configuration to <workspace>/.jeopardy-lint.toml
    Init,
}

#[derive(Args, Default)]
struct CheckArgs {
    #[arg(long)]
    rounds_dir: Option<PathBuf>,
    #[arg(long)]
    prompts_dir: Option<PathBuf>,
    /// Also check this manifest file
    #[arg(long)]
    manifest: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
    /// Exit with status 1 when any issue is found
    #[arg(long)]
    fail_on_issues: bool,
    /// Re-run whenever content changes
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sources = ConfigSources::for_workspace(&cli.workspace);
    match cli.cmd.unwrap_or(Cmd::Check(CheckArgs::default())) {
        Cmd::Check(args) => check(&sources, args),
        Cmd::Manifest { rounds_dir, output, manifest_version } => {
            let cfg = sources.load(&Overrides { rounds_dir, ..Default::default() });
            let version = manifest_version.or(cfg.manifest.version.clone()).unwrap_or_else(|| DEFAULT_VERSION.into());
            let out = output.or(cfg.manifest.output.clone()).unwrap_or_else(|| cfg.content.rounds_dir.join(MANIFEST_FILE));
            let manifest = build_manifest(&cfg.content.rounds_dir, &cfg.content.archive_dirs, &version)?;
            let path = write_manifest(&manifest, &out)?;
            println!("Manifest written: {} ({} rounds)", path.display(), manifest.total_rounds);
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Init => {
            let path = sources.write_workspace(&Config::default())?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(sources: &ConfigSources, args: CheckArgs) -> Result<ExitCode> {
    let overrides = Overrides {
        rounds_dir: args.rounds_dir,
        prompts_dir: args.prompts_dir,
        manifest: args.manifest,
        format: args.format,
        fail_on_issues: args.fail_on_issues,
    };
    let cfg = sources.load(&overrides);
    let format = cfg.report.format.unwrap_or_default();
    info!(rounds = %cfg.content.rounds_dir.display(), prompts = %cfg.content.prompts_dir.display(), "starting validation");

    let mut report = run_checks(&cfg)?;
    println!("{}", report.render(format));

    // exit status follows the most recent run
    if args.watch {
        let paths = vec![cfg.content.rounds_dir.clone(), cfg.content.prompts_dir.clone()];
        watch_paths(&paths, || {
            report = run_checks(&cfg)?;
            println!("{}", report.render(format));
            Ok(())
        })?;
    }

    if report.fails(cfg.report.fail_on_issues) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
