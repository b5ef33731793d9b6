use anyhow::bail;
use clap::{command, Arg, ArgAction};
use context::Context;
use std::path::PathBuf;

mod context;
mod frontmatter;
mod metadata;
mod rewriter;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("content_dir")
                .help("Directory path of documents. Files are rewritten in place.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("content/cubed"),
            Arg::new("extension")
                .short('e')
                .long("extension")
                .help("Extension of documents to rewrite")
                .default_value("mdx"),
            Arg::new("dry_run")
                .short('n')
                .long("dry-run")
                .help("Report what would be updated without writing anything")
                .action(ArgAction::SetTrue),
        ])
        .get_matches();

    let content_dir: &PathBuf = matches.get_one("content_dir").unwrap();
    if !content_dir.exists() || !content_dir.is_dir() {
        bail!("content_dir must be a directory.");
    }
    let extension: &String = matches.get_one("extension").unwrap();

    let ctx = Context::new(
        content_dir.to_owned(),
        extension,
        matches.get_flag("dry_run"),
    );
    rewriter::rewrite_dir(&ctx, &mut std::io::stdout().lock())?;

    Ok(())
}
