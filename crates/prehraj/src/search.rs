use std::sync::LazyLock;

use ezstream_core::types::Candidate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

static RESULT_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.video--link[href]").unwrap());

static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

// Block-level elements end a line of visible text; everything else flows inline.
const BLOCK_ELEMENTS: &[&str] = &[
    "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "br", "li", "ul", "ol", "section", "article",
    "header", "footer", "figure", "figcaption",
];

// Site navigation that the generic fallback must not mistake for results.
const NAVIGATION_PREFIXES: &[&str] = &["/hledej", "/profil", "/cenik"];

const SIZE_UNITS: &[&str] = &["MB", "GB", "kB"];

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}

fn collect_lines(element: ElementRef<'_>, current: &mut String, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            current.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let block = BLOCK_ELEMENTS.contains(&child.value().name());
            if block {
                flush_line(current, lines);
            }
            collect_lines(child, current, lines);
            if block {
                flush_line(current, lines);
            }
        }
    }
}

/// Visible text of a link, one entry per rendered line.
fn text_lines(link: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    collect_lines(link, &mut current, &mut lines);
    flush_line(&mut current, &mut lines);
    lines
}

/// Build a candidate from one result link, or `None` when it carries no title.
///
/// A short line containing `:` is the duration, a line with a size unit is the
/// size, and the last remaining line is the title.
fn parse_link(link: ElementRef<'_>, href: &str, base: &Url) -> Option<Candidate> {
    let mut duration = String::new();
    let mut size = String::new();
    let mut title = String::new();

    let lines = text_lines(link);
    for line in &lines {
        if line.contains(':') && line.len() < 10 {
            duration = line.clone();
        } else if SIZE_UNITS.iter().any(|unit| line.contains(unit)) {
            size = line.clone();
        } else {
            title = line.clone();
        }
    }

    if title.is_empty() && (!size.is_empty() || !duration.is_empty()) {
        title = link
            .value()
            .attr("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .unwrap_or_else(|| lines.join(" "));
    }
    if title.is_empty() {
        return None;
    }

    let address = match base.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!(href, error = %e, "unresolvable result link");
            return None;
        }
    };

    Some(Candidate {
        title: title.trim().to_string(),
        duration,
        size,
        address,
    })
}

/// Extract search hits from a results page, resolving links against `base`.
///
/// Falls back to any link whose text looks like a result (a size and a duration)
/// when the page has no `video--link` anchors.
pub fn parse_search_results(html: &str, base: &Url) -> Vec<Candidate> {
    let document = Html::parse_document(html);

    let mut results: Vec<Candidate> = document
        .select(&RESULT_LINKS)
        .filter_map(|link| {
            let href = link.value().attr("href")?.trim();
            parse_link(link, href, base)
        })
        .collect();

    if results.is_empty() {
        debug!("no result links found, trying generic link fallback");
        results = document
            .select(&ANY_LINK)
            .filter_map(|link| {
                let href = link.value().attr("href")?.trim();
                if NAVIGATION_PREFIXES.iter().any(|p| href.starts_with(p)) {
                    return None;
                }
                let text = text_lines(link).join(" ");
                let has_size = text.contains("MB") || text.contains("GB");
                if !(has_size && text.contains(':')) {
                    return None;
                }
                parse_link(link, href, base)
            })
            .collect();
    }

    if results.is_empty() {
        let page_title = document
            .select(&PAGE_TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        debug!(page_title = %page_title, body_len = html.len(), "search page yielded no results");
        let snippet: String = html.chars().take(2000).collect();
        trace!(snippet = %snippet, "search page head");
    }

    results
}
