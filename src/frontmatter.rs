use std::sync::OnceLock;

use log::warn;
use regex::{Regex, RegexBuilder};
use serde_yaml::{Mapping, Value};

/// Leading `---` block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frontmatter<'a> {
    /// Text between the two markers.
    pub yaml: &'a str,
    /// Everything after the closing marker, starting with its line break.
    pub body: &'a str,
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // pandoc-style metadata block; closing marker must be alone on its line
        RegexBuilder::new(r"\A---\r?\n(?:(.*?)\r?\n)?---(\r?\n|\z)")
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap())
}

pub(crate) fn locate(content: &str) -> Option<Frontmatter<'_>> {
    let caps = header_pattern().captures(content)?;
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(2)?.start();

    Some(Frontmatter {
        yaml,
        body: &content[end..],
    })
}

/// Parses the block leniently: anything that is not a YAML mapping becomes an empty one.
pub(crate) fn parse_block(yaml: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            warn!("Frontmatter is not a mapping ({other:?}). using defaults...");
            Mapping::new()
        }
        Err(e) => {
            warn!("Invalid frontmatter: {e}. using defaults...");
            Mapping::new()
        }
    }
}

pub(crate) fn first_image_url(body: &str) -> Option<&str> {
    image_pattern()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
