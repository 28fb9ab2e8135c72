use std::cmp::Ordering;
use std::sync::LazyLock;

use ezstream_core::types::{Candidate, RankedResult, StreamDescriptor};
use regex::Regex;

pub const SITE_LABEL: &str = "Prehraj.to";
pub const STREAM_MARKER: &str = "⚡";

static RE_SOURCE_4K: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Source:\s*4K").unwrap());

static RE_SOURCE_1080: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Source:\s*1080p").unwrap());

// "Source: 1280 x 720 px" -> 720
static RE_SOURCE_RAW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Source:.*[x×]\s*(\d+)").unwrap());

static RE_STREAM_RES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"⚡\s+(\d{3,4})p").unwrap());

static RE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"💾\s*(\d+(?:[.,]\d+)?)\s*(GB|MB|kB)").unwrap());

/// Human summary of a details-page resolution: `4K`, `1080p`, or the raw text.
pub fn display_resolution(hint: &str) -> &str {
    if hint.contains("3840") || hint.contains("2160") {
        "4K"
    } else if hint.contains("1920") || hint.contains("1080") {
        "1080p"
    } else {
        hint
    }
}

/// Merge a stream with the search hit it came from into its display form.
///
/// ```text
/// name:        Prehraj.to ⚡ 1080p
/// description: 📂 Wicked 2024 CZ
///              💾 4.2 GB • ⏱️ 2:40:12
///              ⚙️ Source: 4K
/// ```
pub fn compose(stream: &StreamDescriptor, origin: &Candidate) -> RankedResult {
    let mut description = format!(
        "📂 {}\n💾 {} • ⏱️ {}",
        origin.title, origin.size, origin.duration
    );
    if let Some(hint) = stream.source_resolution.as_deref().filter(|h| !h.is_empty()) {
        description.push_str(&format!("\n⚙️ Source: {}", display_resolution(hint)));
    }

    RankedResult {
        name: format!("{SITE_LABEL} {STREAM_MARKER} {}", stream.label),
        description,
        url: stream.address.clone(),
    }
}

/// Height of the uploaded original, read from the description's `Source:` line.
pub fn source_height(description: &str) -> u32 {
    if RE_SOURCE_4K.is_match(description) {
        return 2160;
    }
    if RE_SOURCE_1080.is_match(description) {
        return 1080;
    }
    RE_SOURCE_RAW
        .captures(description)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// Height of the encoded stream, from the `⚡ NNNNp` token of the display name.
pub fn stream_height(name: &str) -> u32 {
    RE_STREAM_RES
        .captures(name)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// File size in megabytes, from the description's `💾` line.
pub fn size_megabytes(description: &str) -> f64 {
    let Some(caps) = RE_SIZE.captures(description) else {
        return 0.0;
    };
    let value: f64 = caps[1].replace(',', ".").parse().unwrap_or(0.0);
    match &caps[2] {
        "GB" => value * 1024.0,
        "kB" => value / 1024.0,
        _ => value,
    }
}

#[derive(Debug, Clone, Copy)]
struct RankKey {
    source: u32,
    stream: u32,
    size_mb: f64,
    has_year: bool,
}

impl RankKey {
    fn of(result: &RankedResult, year: &str) -> Self {
        Self {
            source: source_height(&result.description),
            stream: stream_height(&result.name),
            size_mb: size_megabytes(&result.description),
            has_year: result.description.contains(year),
        }
    }

    /// Descending on every key, strictly lexicographic.
    fn priority(&self, other: &Self) -> Ordering {
        other
            .source
            .cmp(&self.source)
            .then_with(|| other.stream.cmp(&self.stream))
            .then_with(|| other.size_mb.total_cmp(&self.size_mb))
            .then_with(|| other.has_year.cmp(&self.has_year))
    }
}

/// Order results by source resolution, then stream resolution, then size, then
/// whether the description mentions `year`. Ties keep their input order.
pub fn rank(results: Vec<RankedResult>, year: &str) -> Vec<RankedResult> {
    let mut keyed: Vec<(RankKey, RankedResult)> = results
        .into_iter()
        .map(|r| (RankKey::of(&r, year), r))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.priority(b));
    keyed.into_iter().map(|(_, r)| r).collect()
}
