pub mod markup;

use feed_rs::model::{Entry, Link, Text};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{RelayError, Result};
use crate::domain::FeedEntry;

pub use markup::strip_markup;

/// Turns raw RSS/Atom/JSON Feed bytes into [`FeedEntry`] values.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Entries come back in the feed's own order.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<FeedEntry>> {
        // Entries without an id of their own are keyed by their link
        let feed = parser::Builder::new()
            .id_generator(fallback_id)
            .build()
            .parse(body)
            .map_err(|e| RelayError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let normalized = to_feed_entry(entry);
                if normalized.is_none() {
                    tracing::warn!("Skipping feed entry with neither id nor link");
                }
                normalized
            })
            .collect();

        Ok(entries)
    }
}

fn fallback_id(links: &[Link], title: &Option<Text>, _uri: Option<&str>) -> String {
    links
        .first()
        .map(|l| l.href.clone())
        .or_else(|| title.as_ref().map(|t| t.content.clone()))
        .unwrap_or_default()
}

fn to_feed_entry(entry: Entry) -> Option<FeedEntry> {
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let id = if entry.id.is_empty() {
        link.clone()
    } else {
        entry.id
    };
    if id.is_empty() {
        return None;
    }

    let title = entry
        .title
        .map(|t| decode_html_entities(&t.content).to_string())
        .unwrap_or_default();

    let description = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    Some(FeedEntry {
        id,
        title,
        link,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <description>A test feed</description>
    <item>
      <title>Test Item 1</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>&lt;p&gt;This is item 1&lt;/p&gt;</description>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <id>urn:feed</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "item-1");
        assert_eq!(entries[0].title, "Test Item 1");
        assert_eq!(entries[0].link, "https://example.com/item1");
        assert_eq!(
            entries[0].description.as_deref().map(strip_markup),
            Some("This is item 1".to_string())
        );
    }

    #[test]
    fn test_missing_guid_falls_back_to_link() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries[1].id, "https://example.com/item2");
        assert_eq!(entries[1].description, None);
    }

    #[test]
    fn test_parse_atom() {
        let entries = Normalizer::new().normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "atom-entry-1");
        assert_eq!(entries[0].title, "Atom Entry 1");
        assert_eq!(entries[0].link, "https://example.com/atom1");
        assert_eq!(entries[0].description.as_deref(), Some("This is Atom entry 1"));
    }

    #[test]
    fn test_ids_are_stable_across_parses() {
        let normalizer = Normalizer::new();
        let first = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();
        let second = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[1].id, second[1].id);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = Normalizer::new().normalize(b"this is not a feed");
        assert!(matches!(result, Err(RelayError::FeedParse(_))));
    }
}
