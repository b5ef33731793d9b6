use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Normalized frontmatter. Field order is the serialized key order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Metadata {
    pub author: String,
    pub title: String,
    pub date: String,
    pub topic: String,
    pub description: String,
    pub featured_image_url: String,
}

impl Metadata {
    pub fn from_frontmatter(old: &Mapping, image_url: Option<&str>, today: NaiveDate) -> Self {
        Self {
            author: present(old, "authors")
                .or_else(|| present(old, "author"))
                .map(first_or_self)
                .unwrap_or_default(),
            title: present(old, "title")
                .and_then(as_text)
                .unwrap_or_default(),
            date: present(old, "date")
                .and_then(as_text)
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            topic: present(old, "tags")
                .or_else(|| present(old, "topic"))
                .map(first_or_self)
                .unwrap_or_default(),
            description: present(old, "summary")
                .or_else(|| present(old, "description"))
                .and_then(as_text)
                .unwrap_or_default(),
            featured_image_url: image_url.unwrap_or_default().to_string(),
        }
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("while serializing frontmatter")
    }
}

// null counts as absent
fn present<'a>(old: &'a Mapping, key: &str) -> Option<&'a Value> {
    old.get(key).filter(|v| !v.is_null())
}

fn first_or_self(value: &Value) -> String {
    match value {
        Value::Sequence(items) => items.first().and_then(as_text).unwrap_or_default(),
        Value::Tagged(tagged) => first_or_self(&tagged.value),
        scalar => as_text(scalar).unwrap_or_default(),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => as_text(&tagged.value),
        // nested structure where a scalar was expected: keep it as flow text
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn remaps_legacy_fields() {
        let old = mapping(
            "authors: [Alice, Bob]\ntags: [tech, news]\ntitle: T\ndate: 2024-01-01\nsummary: S\n",
        );
        let meta = Metadata::from_frontmatter(&old, Some("http://img/1.png"), today());
        assert_eq!(
            meta,
            Metadata {
                author: "Alice".to_string(),
                title: "T".to_string(),
                date: "2024-01-01".to_string(),
                topic: "tech".to_string(),
                description: "S".to_string(),
                featured_image_url: "http://img/1.png".to_string(),
            }
        );
    }

    #[test]
    fn defaults_for_missing_fields() {
        let meta = Metadata::from_frontmatter(&Mapping::new(), None, today());
        assert_eq!(meta.author, "");
        assert_eq!(meta.title, "");
        assert_eq!(meta.date, "2026-10-18");
        assert_eq!(meta.topic, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.featured_image_url, "");
    }

    #[test]
    fn scalar_authors_and_tags_are_used_as_is() {
        let old = mapping("authors: Carol\ntags: rust\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.author, "Carol");
        assert_eq!(meta.topic, "rust");
    }

    #[test]
    fn empty_lists_become_empty_strings() {
        let old = mapping("authors: []\ntags: []\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.author, "");
        assert_eq!(meta.topic, "");
    }

    #[test]
    fn non_string_scalars_are_coerced() {
        let old = mapping("title: 42\ndate: 20240101\ntags: [2024, x]\nsummary: true\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.title, "42");
        assert_eq!(meta.date, "20240101");
        assert_eq!(meta.topic, "2024");
        assert_eq!(meta.description, "true");
    }

    #[test]
    fn null_counts_as_absent() {
        let old = mapping("date: ~\nauthors: null\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.date, "2026-10-18");
        assert_eq!(meta.author, "");
    }

    #[test]
    fn nested_values_are_kept_as_flow_text() {
        let old = mapping("title:\n  en: Hello\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.title, r#"{"en":"Hello"}"#);
    }

    #[test]
    fn normalized_keys_are_a_fallback() {
        let old = mapping("author: Alice\ntopic: tech\ndescription: S\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.author, "Alice");
        assert_eq!(meta.topic, "tech");
        assert_eq!(meta.description, "S");

        let old = mapping("authors: [Bob]\nauthor: Alice\n");
        let meta = Metadata::from_frontmatter(&old, None, today());
        assert_eq!(meta.author, "Bob");
    }

    #[test]
    fn serializes_in_fixed_order() {
        let meta = Metadata {
            author: "Alice".to_string(),
            title: "T".to_string(),
            date: "2024-01-01".to_string(),
            topic: String::new(),
            description: String::new(),
            featured_image_url: String::new(),
        };
        assert_eq!(
            meta.to_yaml().unwrap(),
            "author: Alice\ntitle: T\ndate: 2024-01-01\ntopic: ''\ndescription: ''\nfeatured_image_url: ''\n"
        );
    }

    #[test]
    fn special_characters_round_trip() {
        let meta = Metadata {
            author: "José Müller".to_string(),
            title: "Rust: a \"fast\" language # really".to_string(),
            date: "2024-01-01".to_string(),
            topic: "true".to_string(),
            description: "line one\nline two".to_string(),
            featured_image_url: "https://example.com/a b.png?x=1&y=2".to_string(),
        };
        let yaml = meta.to_yaml().unwrap();
        assert!(yaml.contains("José Müller"));

        let back = Metadata::from_frontmatter(&mapping(&yaml), Some(&meta.featured_image_url), today());
        assert_eq!(back, meta);
    }
}
