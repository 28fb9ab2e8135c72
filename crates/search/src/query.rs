use std::collections::HashSet;

use ezstream_core::types::TitleContext;

use crate::normalize::normalize_title;

/// Spelling variants of one title: raw, normalized, and colon-free.
fn title_variants(name: &str) -> Vec<String> {
    let mut variants = vec![name.to_string()];

    let normalized = normalize_title(name);
    if normalized != name {
        variants.push(normalized);
    }

    if name.contains(':') {
        let colon_free = name.replace(':', " ");
        if !variants.contains(&colon_free) {
            variants.push(colon_free);
        }
    }

    variants
}

/// Expand a title into the ordered, de-duplicated list of upstream search queries.
///
/// Every variant of the localized and original name is emitted bare and, when the
/// year is known, with the year appended; an `SxxEyy` suffix follows when both
/// season and episode are set. First occurrence wins and empty queries are dropped.
pub fn expand_queries(ctx: &TitleContext) -> Vec<String> {
    let suffix = ctx
        .episode_tag()
        .map(|tag| format!(" {tag}"))
        .unwrap_or_default();
    let year = ctx.year.trim();

    let mut seen = HashSet::new();
    let mut queries = Vec::new();
    let mut push = |raw: String| {
        let q = raw.trim().to_string();
        if !q.is_empty() && seen.insert(q.clone()) {
            queries.push(q);
        }
    };

    for name in ctx.names() {
        for variant in title_variants(name) {
            push(format!("{variant}{suffix}"));
            if !year.is_empty() {
                push(format!("{variant} {year}{suffix}"));
            }
        }
    }

    queries
}
