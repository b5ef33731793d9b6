use chrono::NaiveDate;
use std::path::PathBuf;

/// Settings for one run over a content directory.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub content_dir: PathBuf,
    pub extension: String,
    pub dry_run: bool,

    /// Fallback `date`, fixed at startup so every file in a run agrees.
    pub today: NaiveDate,
}

impl Context {
    pub fn new(content_dir: PathBuf, extension: &str, dry_run: bool) -> Self {
        Self {
            content_dir,
            extension: extension.trim_start_matches('.').to_string(),
            dry_run,
            today: chrono::Local::now().date_naive(),
        }
    }
}
