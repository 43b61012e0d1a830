// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::DiscogsError;

/// A single release (one pressing of a recording).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// Discogs release ID.
    pub id: Option<u64>,
    /// Release title.
    pub title: Option<String>,
    /// Moderation status (e.g., "Accepted").
    pub status: Option<String>,
    /// Credited main artists.
    #[serde(default)]
    pub artists: Option<Vec<ArtistCredit>>,
    /// Additional credits (producers, engineers, ...).
    #[serde(default)]
    pub extraartists: Option<Vec<ArtistCredit>>,
    /// Labels and catalogue numbers.
    #[serde(default)]
    pub labels: Option<Vec<LabelCredit>>,
    /// Physical or digital formats.
    #[serde(default)]
    pub formats: Option<Vec<Format>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
    /// Country of release.
    pub country: Option<String>,
    /// Release date as entered on Discogs (YYYY, YYYY-MM or YYYY-MM-DD).
    pub released: Option<String>,
    pub notes: Option<String>,
    /// Master release this release belongs to, if any.
    pub master_id: Option<u64>,
    #[serde(default)]
    pub tracklist: Option<Vec<Track>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A master release, grouping every version of the same recording.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MasterRelease {
    /// Discogs master ID.
    pub id: Option<u64>,
    pub title: Option<String>,
    /// ID of the release chosen as the canonical version.
    pub main_release: Option<u64>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<u32>,
    #[serde(default)]
    pub artists: Option<Vec<ArtistCredit>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
    #[serde(default)]
    pub tracklist: Option<Vec<Track>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    /// Every release attached to this master.
    #[serde(default)]
    pub versions: Option<Vec<ReleaseSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Artist information from Discogs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Artist name, including any disambiguation suffix (e.g., "Theo (3)").
    pub name: Option<String>,
    /// Legal name of the person behind the artist name.
    pub realname: Option<String>,
    /// Free-form biography.
    pub profile: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub namevariations: Option<Vec<String>>,
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
    /// Group members, when the artist is a group.
    #[serde(default)]
    pub members: Option<Vec<String>>,
    /// Groups the artist belongs to.
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    /// Discography; only present when releases were requested.
    pub releases: Option<Vec<ReleaseSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record label information from Discogs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Label {
    pub name: Option<String>,
    pub profile: Option<String>,
    pub contactinfo: Option<String>,
    /// Name of the parent label, if this is a sublabel.
    #[serde(rename = "parentLabel")]
    pub parent_label: Option<String>,
    #[serde(default)]
    pub sublabels: Option<Vec<String>>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    /// Catalogue; only present when releases were requested.
    pub releases: Option<Vec<ReleaseSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search results: exact name matches plus one page of fuzzy matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    #[serde(default)]
    pub exactresults: Option<Vec<SearchResult>>,
    pub searchresults: Option<SearchPage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    /// 1-based index of the first result on this page.
    pub start: Option<u32>,
    /// 1-based index of the last result on this page.
    pub end: Option<u32>,
    /// Total number of matches across all pages.
    #[serde(rename = "numResults")]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Kind of entity matched ("release", "artist", "label", "master").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    /// Link to the entity page on discogs.com.
    pub uri: Option<String>,
    pub summary: Option<String>,
    pub thumb: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Artist credit entry on a release, master or track.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtistCredit {
    pub name: Option<String>,
    /// Artist name variation used on this release.
    #[serde(default)]
    pub anv: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ").
    #[serde(default)]
    pub join: Option<String>,
    /// Role for extra artists (e.g., "Producer").
    #[serde(default)]
    pub role: Option<String>,
    /// Tracks the credit applies to, when not the whole release.
    #[serde(default)]
    pub tracks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelCredit {
    pub name: Option<String>,
    /// Catalogue number.
    #[serde(default)]
    pub catno: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Format {
    /// Format name (e.g., "Vinyl", "CD").
    pub name: Option<String>,
    #[serde(default)]
    pub descriptions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Position on the release (e.g., "A1", "3").
    pub position: Option<String>,
    pub title: Option<String>,
    /// Duration as displayed ("4:32"); may be empty or absent when unknown.
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// "primary" or "secondary".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
    /// 150px thumbnail.
    pub uri150: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Short release entry as listed in discographies and master versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseSummary {
    pub id: Option<u64>,
    pub title: Option<String>,
    /// "release" or "master".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Credit role of the artist on this release (e.g., "Main", "Remix").
    pub role: Option<String>,
    pub status: Option<String>,
    /// Sent as a number or a numeric string.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<u32>,
    pub format: Option<String>,
    pub label: Option<String>,
    pub catno: Option<String>,
    pub thumb: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept a year as a number or a numeric string; anything else is unknown.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Entity kinds the search endpoint can be restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Releases,
    Artists,
    Labels,
}

impl SearchType {
    /// Wire value of the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Releases => "releases",
            SearchType::Artists => "artists",
            SearchType::Labels => "labels",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = DiscogsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "releases" => Ok(SearchType::Releases),
            "artists" => Ok(SearchType::Artists),
            "labels" => Ok(SearchType::Labels),
            _ => Err(DiscogsError::InvalidSearchType(s.to_string())),
        }
    }
}
