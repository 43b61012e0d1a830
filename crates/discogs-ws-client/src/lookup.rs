// SPDX-License-Identifier: GPL-3.0-or-later

use url::Url;

use crate::error::{DiscogsError, Result};
use crate::models::SearchType;

/// One call against the Discogs web service.
///
/// Every variant maps to exactly one GET request and one envelope key, so
/// URL construction can be checked without a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Release(u64),
    Master(u64),
    Artist {
        name: String,
        include_releases: bool,
    },
    Label {
        name: String,
        include_releases: bool,
    },
    Search {
        query: String,
        search_type: SearchType,
        page: u32,
    },
}

impl Lookup {
    pub fn artist(name: impl Into<String>, include_releases: bool) -> Self {
        Lookup::Artist {
            name: name.into(),
            include_releases,
        }
    }

    pub fn label(name: impl Into<String>, include_releases: bool) -> Self {
        Lookup::Label {
            name: name.into(),
            include_releases,
        }
    }

    pub fn search(query: impl Into<String>, search_type: SearchType, page: u32) -> Self {
        Lookup::Search {
            query: query.into(),
            search_type,
            page,
        }
    }

    /// Key under `resp` holding the payload for this call.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            Lookup::Release(_) => "release",
            Lookup::Master(_) => "master",
            Lookup::Artist { .. } => "artist",
            Lookup::Label { .. } => "label",
            Lookup::Search { .. } => "search",
        }
    }

    /// Build the request URL below `base`.
    ///
    /// Names become a single percent-encoded path segment; the search query
    /// is form-encoded. Any query or fragment on `base` is discarded.
    pub fn url(&self, base: &Url) -> Result<Url> {
        if let Lookup::Search { page: 0, .. } = self {
            return Err(DiscogsError::InvalidPage(0));
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DiscogsError::InvalidBaseUrl(base.to_string()))?;
            segments.pop_if_empty();

            match self {
                Lookup::Release(id) => {
                    segments.push("release").push(&id.to_string());
                }
                Lookup::Master(id) => {
                    segments.push("master").push(&id.to_string());
                }
                Lookup::Artist { name, .. } => {
                    segments.push("artist").push(name);
                }
                Lookup::Label { name, .. } => {
                    segments.push("label").push(name);
                }
                Lookup::Search { .. } => {
                    segments.push("search");
                }
            }
        }

        match self {
            Lookup::Artist {
                include_releases: true,
                ..
            }
            | Lookup::Label {
                include_releases: true,
                ..
            } => {
                url.query_pairs_mut().append_pair("releases", "1");
            }
            Lookup::Search {
                query,
                search_type,
                page,
            } => {
                url.query_pairs_mut()
                    .append_pair("q", query)
                    .append_pair("type", search_type.as_str())
                    .append_pair("page", &page.to_string());
            }
            _ => {}
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn base() -> Url {
        Url::parse("http://api.discogs.com/").unwrap()
    }

    fn last_segment(url: &Url) -> String {
        url.path_segments().unwrap().last().unwrap().to_string()
    }

    #[test]
    fn test_release_url_has_id_as_last_segment() {
        for id in [1_u64, 42, 1_234_567, u64::MAX] {
            let url = Lookup::Release(id).url(&base()).unwrap();
            assert_eq!(url.path(), format!("/release/{id}"));
            assert_eq!(last_segment(&url), id.to_string());
            assert_eq!(url.query(), None);
        }
    }

    #[test]
    fn test_master_url_has_no_query() {
        let url = Lookup::Master(1660109).url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://api.discogs.com/master/1660109");
    }

    #[test]
    fn test_artist_name_is_one_encoded_segment() {
        for name in ["Theo (3)", "AC/DC", "Simon & Garfunkel", "Sigur Rós", "100% Pure"] {
            let url = Lookup::artist(name, false).url(&base()).unwrap();
            let segments: Vec<_> = url.path_segments().unwrap().collect();
            assert_eq!(segments.len(), 2, "unexpected path for {name}: {}", url.path());
            assert_eq!(segments[0], "artist");
            assert!(!segments[1].contains(' '));

            let decoded = percent_decode_str(segments[1]).decode_utf8().unwrap();
            assert_eq!(decoded, name);
        }
    }

    #[test]
    fn test_artist_name_encoding() {
        let url = Lookup::artist("Theo (3)", false).url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://api.discogs.com/artist/Theo%20(3)");

        let url = Lookup::artist("AC/DC", false).url(&base()).unwrap();
        assert_eq!(url.path(), "/artist/AC%2FDC");
    }

    #[test]
    fn test_include_releases_flag() {
        let without = Lookup::artist("Theo (3)", false).url(&base()).unwrap();
        let with = Lookup::artist("Theo (3)", true).url(&base()).unwrap();

        assert_eq!(without.query(), None);
        assert!(!without.as_str().ends_with('?'));
        assert_eq!(with.query(), Some("releases=1"));
        assert_eq!(with.path(), without.path());
        assert_ne!(with, without);

        let label = Lookup::label("Warp Records", true).url(&base()).unwrap();
        assert_eq!(
            label.as_str(),
            "http://api.discogs.com/label/Warp%20Records?releases=1"
        );
    }

    #[test]
    fn test_search_url() {
        let url = Lookup::search("daft punk & friends", SearchType::Artists, 3)
            .url(&base())
            .unwrap();

        assert_eq!(url.path(), "/search");
        assert_eq!(url.query(), Some("q=daft+punk+%26+friends&type=artists&page=3"));

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "daft punk & friends".to_string()),
                ("type".to_string(), "artists".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_rejects_page_zero() {
        let result = Lookup::search("nirvana", SearchType::All, 0).url(&base());
        assert!(matches!(result, Err(DiscogsError::InvalidPage(0))));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let base = Url::parse("http://localhost:8080/api?token=x#frag").unwrap();
        let url = Lookup::Release(7).url(&base).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/release/7");

        let base = Url::parse("http://localhost:8080/api/").unwrap();
        let url = Lookup::Release(7).url(&base).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/release/7");
    }

    #[test]
    fn test_envelope_keys() {
        assert_eq!(Lookup::Release(1).envelope_key(), "release");
        assert_eq!(Lookup::Master(1).envelope_key(), "master");
        assert_eq!(Lookup::artist("x", true).envelope_key(), "artist");
        assert_eq!(Lookup::label("x", false).envelope_key(), "label");
        assert_eq!(
            Lookup::search("x", SearchType::Labels, 1).envelope_key(),
            "search"
        );
    }
}
