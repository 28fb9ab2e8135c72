use std::collections::HashSet;
use std::sync::LazyLock;

use ezstream_core::types::{Candidate, TitleContext};
use regex::Regex;
use tracing::debug;

use crate::normalize::normalize_for_match;

// Four-digit release years: 1900-2099.
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// All 19xx/20xx year tokens in a title.
pub fn years_in(title: &str) -> Vec<u32> {
    RE_YEAR
        .find_iter(title)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// A title passes when it mentions no year at all, or mentions the target year.
pub fn matches_year(title: &str, target: u32) -> bool {
    let years = years_in(title);
    years.is_empty() || years.contains(&target)
}

/// Whether any of `names` occurs in `title` after normalization.
pub fn is_title_relevant(title: &str, names: &[&str]) -> bool {
    let title = normalize_for_match(title);
    names
        .iter()
        .map(|name| normalize_for_match(name))
        .any(|name| title.contains(&name))
}

/// Keep the first candidate seen for every address.
pub fn dedup_by_address(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.address.clone()))
        .collect()
}

/// Reduce the accumulated search hits to unique, plausibly matching candidates.
///
/// Only the year check rejects anything. Title relevance is evaluated and logged but
/// never drops a hit. Output keeps first-seen order.
pub fn filter_candidates(candidates: Vec<Candidate>, ctx: &TitleContext) -> Vec<Candidate> {
    let target_year = ctx.year.trim().parse::<u32>().ok().filter(|y| *y > 0);
    let names = ctx.names();

    let relevant = candidates
        .into_iter()
        .filter(|c| match target_year {
            Some(year) => matches_year(&c.title, year),
            None => true,
        })
        .inspect(|c| {
            if !is_title_relevant(&c.title, &names) {
                debug!(title = %c.title, "candidate title does not contain the searched name");
            }
        })
        .collect();

    dedup_by_address(relevant)
}
