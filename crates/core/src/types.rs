use serde::{Deserialize, Serialize};

/// Media kind as it appears in add-on routes (`/stream/{kind}/…`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the search pipeline knows about the requested title.
///
/// Built once per request from the metadata lookup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleContext {
    pub name: String,
    /// Original-language title; may be empty or equal to `name`.
    pub original_name: String,
    /// Release year as text, possibly empty.
    pub year: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl TitleContext {
    pub fn movie(
        name: impl Into<String>,
        original_name: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_name: original_name.into(),
            year: year.into(),
            season: None,
            episode: None,
        }
    }

    pub fn with_episode(mut self, season: u32, episode: u32) -> Self {
        self.season = Some(season);
        self.episode = Some(episode);
        self
    }

    /// The localized name, followed by the original name when it is set and differs.
    pub fn names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        if !self.original_name.is_empty() && self.original_name != self.name {
            names.push(self.original_name.as_str());
        }
        names
    }

    /// `S01E02`-style tag, present only when both season and episode are known.
    pub fn episode_tag(&self) -> Option<String> {
        match (self.season, self.episode) {
            (Some(s), Some(e)) => Some(format!("S{s:02}E{e:02}")),
            _ => None,
        }
    }
}

/// One raw hit from the upstream search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub duration: String,
    pub size: String,
    /// Always absolute.
    pub address: String,
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.title, self.address)
    }
}

/// One playable source extracted from a details page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Encoded stream label such as `1080p`, or `Unknown`.
    pub label: String,
    /// Resolution of the uploaded original as reported by the details page,
    /// shared by every stream of that page.
    pub source_resolution: Option<String>,
    pub address: String,
}

/// A ranked, display-ready stream. Serialized field names follow the add-on protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub name: String,
    #[serde(rename = "title")]
    pub description: String,
    pub url: String,
}
