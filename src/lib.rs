pub mod config;
pub mod error;
pub mod issue;
pub mod json_file;
pub mod manifest;
pub mod model;
pub mod prompts;
pub mod report;
pub mod rounds;
pub mod structure;
pub mod watch;

pub use config::{Config, ConfigSources, Overrides, ReportFormat};
pub use error::{LintError, ReadError};
pub use issue::{Issue, IssueKind};
pub use json_file::validate_json_file;
pub use manifest::{build_manifest, validate_manifest, write_manifest, ContentManifest, RoundMetadata};
pub use model::{Category, CategoryMeta, Question, Reveal, Round};
pub use prompts::check_prompt_files;
pub use report::{check_dataset, run_checks, Report};
pub use rounds::check_round_consistency;
pub use structure::{validate_category_structure, validate_question_structure, validate_round_structure};
