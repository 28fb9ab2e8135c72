//! Best-effort stream extraction from a details page.
//!
//! The page embeds its player playlist as a script literal,
//! `var sources = [{ file: "…", label: '1080p' }, …];`, and lists file facts
//! (`<li><span>Rozlišení:</span><span>1920 x 1080 px</span></li>`) in markup.
//! Both are matched with narrow patterns; nothing here parses HTML or JavaScript.

use std::sync::LazyLock;

use ezstream_core::types::StreamDescriptor;
use regex::Regex;

use crate::source::SourceError;

/// Label of the "resolution" row in the details page's file facts.
pub const RESOLUTION_MARKER: &str = "Rozlišení:";

pub const UNKNOWN_LABEL: &str = "Unknown";

static RE_SOURCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\s+sources\s*=\s*(\[[\s\S]*?\]);").unwrap());

static RE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"file\s*:\s*["']([^"']+)["']"#).unwrap());

static RE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"label\s*:\s*["']([^"']+)["']"#).unwrap());

static RE_LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").unwrap());

static RE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span>").unwrap());

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Strip tags and the handful of entities the site emits, then trim.
pub(crate) fn markup_text(fragment: &str) -> String {
    RE_TAG
        .replace_all(fragment, " ")
        .replace("&nbsp;", " ")
        .replace("&times;", "×")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `(file, label)` pairs from the embedded `sources` literal, in page order.
pub fn extract_sources(page: &str) -> Vec<(String, String)> {
    let Some(caps) = RE_SOURCES.captures(page) else {
        return Vec::new();
    };

    caps[1]
        .split('{')
        .filter(|segment| segment.contains("file"))
        .filter_map(|segment| {
            let file = RE_FILE.captures(segment)?[1].replace("\\/", "/");
            let label = RE_LABEL
                .captures(segment)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
            Some((file, label))
        })
        .collect()
}

/// Resolution of the uploaded original, taken from the first list item carrying
/// [`RESOLUTION_MARKER`].
pub fn find_source_resolution(page: &str) -> Option<String> {
    let item = RE_LIST_ITEM
        .captures_iter(page)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
        .find(|inner| markup_text(inner).contains(RESOLUTION_MARKER))?;

    let from_spans = RE_SPAN
        .captures_iter(item)
        .map(|c| markup_text(&c[1]))
        .find(|text| !text.is_empty() && !text.contains(RESOLUTION_MARKER));

    from_spans.or_else(|| {
        let text = markup_text(item);
        text.split_once(RESOLUTION_MARKER)
            .map(|(_, rest)| rest.trim().to_string())
            .filter(|rest| !rest.is_empty())
    })
}

/// Every playable stream on a details page, each carrying the page-level resolution.
pub fn extract_streams(page: &str) -> Result<Vec<StreamDescriptor>, SourceError> {
    let sources = extract_sources(page);
    if sources.is_empty() {
        return Err(SourceError::NoSources);
    }

    let source_resolution = find_source_resolution(page);
    Ok(sources
        .into_iter()
        .map(|(address, label)| StreamDescriptor {
            label,
            source_resolution: source_resolution.clone(),
            address,
        })
        .collect())
}
