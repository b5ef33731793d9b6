use std::{ffi::OsStr, io::Write, path::Path};

use anyhow::Context as _;
use chrono::NaiveDate;
use log::{debug, info};

use crate::{context::Context, frontmatter, metadata::Metadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Updated,
    Skipped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Returns the document with its frontmatter normalized, or `None` when it has no leading block.
pub(crate) fn rewrite_content(content: &str, today: NaiveDate) -> anyhow::Result<Option<String>> {
    let Some(fm) = frontmatter::locate(content) else {
        return Ok(None);
    };

    let old = frontmatter::parse_block(fm.yaml);
    let image_url = frontmatter::first_image_url(fm.body);
    let yaml = Metadata::from_frontmatter(&old, image_url, today).to_yaml()?;

    let mut out = String::with_capacity(yaml.len() + fm.body.len() + 8);
    out.push_str("---\n");
    out.push_str(&yaml);
    out.push_str("---");
    out.push_str(fm.body);
    Ok(Some(out))
}

pub(crate) fn rewrite_file(path: &Path, ctx: &Context) -> anyhow::Result<Outcome> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?;

    let Some(new_content) = rewrite_content(&content, ctx.today)? else {
        debug!("{path:?} has no frontmatter. skipping...");
        return Ok(Outcome::Skipped);
    };

    if ctx.dry_run {
        debug!("dry run: not writing {path:?}");
    } else {
        std::fs::write(path, new_content).with_context(|| format!("while writing {path:?}"))?;
    }
    Ok(Outcome::Updated)
}

/// Rewrites every matching file in `ctx.content_dir`, reporting one line per file to `out`.
/// Only listing the directory (or writing to `out`) can fail the whole run.
pub(crate) fn rewrite_dir<W: Write>(ctx: &Context, out: &mut W) -> anyhow::Result<Summary> {
    let mut paths = vec![];
    for entry in std::fs::read_dir(&ctx.content_dir)
        .with_context(|| format!("while listing {:?}", ctx.content_dir))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(&ctx.extension)) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut summary = Summary::default();
    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match rewrite_file(&path, ctx) {
            Ok(Outcome::Updated) => {
                summary.updated += 1;
                writeln!(out, "Successfully updated {file_name}")?;
            }
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                summary.failed += 1;
                writeln!(out, "Error processing {file_name}: {e:#}")?;
            }
        }
    }

    info!(
        "{} updated, {} skipped, {} failed in {:?}",
        summary.updated, summary.skipped, summary.failed, ctx.content_dir
    );
    Ok(summary)
}
