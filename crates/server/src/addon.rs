//! Add-on protocol documents: the manifest and stream id parsing.

use ezstream_core::types::{MediaKind, RankedResult};
use serde::Serialize;

pub const ADDON_ID: &str = "org.ezstremio.addon";
pub const ADDON_NAME: &str = "ezStremio";
pub const ID_PREFIX: &str = "eztmdb:";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub catalogs: Vec<serde_json::Value>,
    pub id_prefixes: Vec<&'static str>,
}

pub fn manifest() -> Manifest {
    Manifest {
        id: ADDON_ID,
        version: env!("CARGO_PKG_VERSION"),
        name: ADDON_NAME,
        description: "Czech/Slovak dubbed films and TV shows",
        resources: vec!["stream"],
        types: vec![MediaKind::Movie.as_str(), MediaKind::Series.as_str()],
        catalogs: Vec::new(),
        id_prefixes: vec![ID_PREFIX],
    }
}

#[derive(Debug, Default, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<RankedResult>,
}

/// A parsed `eztmdb:<tmdb id>[:<season>:<episode>]` stream id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub tmdb_id: String,
    pub episode: Option<(u32, u32)>,
}

/// Parse a stream id as it appears in the route, with or without a `.json` suffix.
///
/// Returns `None` for foreign prefixes and for TMDB ids that are not plain
/// numbers. A season or episode that is not a number is ignored and the whole
/// title is searched.
pub fn parse_stream_id(raw: &str) -> Option<StreamRequest> {
    let raw = raw.strip_suffix(".json").unwrap_or(raw);
    let rest = raw.strip_prefix(ID_PREFIX)?;

    let mut parts = rest.split(':');
    let tmdb_id = parts
        .next()
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))?
        .to_string();

    let episode = match (parts.next(), parts.next()) {
        (Some(season), Some(episode)) => {
            season.parse::<u32>().ok().zip(episode.parse::<u32>().ok())
        }
        _ => None,
    };

    Some(StreamRequest { tmdb_id, episode })
}
