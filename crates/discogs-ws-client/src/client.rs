// SPDX-License-Identifier: GPL-3.0-or-later

use crate::blocking;
use crate::error::{DiscogsError, Result};
use crate::lookup::Lookup;
use crate::models::{Artist, Label, MasterRelease, Release, SearchResults, SearchType};
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, trace};
use url::Url;

pub const DISCOGS_API_BASE: &str = "http://api.discogs.com/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Discogs web service client.
///
/// Holds only immutable configuration, so it can be cloned and shared
/// between tasks freely.
#[derive(Debug, Clone)]
pub struct DiscogsClient {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl DiscogsClient {
    /// Create a client against the public Discogs endpoint.
    ///
    /// `user_agent` is sent verbatim with every request and should follow
    /// the usual `Product/Version` convention.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        Self::builder(user_agent).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder(user_agent: impl Into<String>) -> DiscogsClientBuilder {
        DiscogsClientBuilder::new(user_agent)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Look up a release by Discogs ID.
    ///
    /// # Example
    /// ```no_run
    /// # use discogs_ws_client::DiscogsClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DiscogsClient::new("MyApp/0.1")?;
    /// let release = client.get_release(249504).await?;
    /// println!("{:?}", release.title);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn get_release(&self, release_id: u64) -> Result<Release> {
        self.fetch(&Lookup::Release(release_id)).await
    }

    /// Look up a master release by Discogs ID.
    #[instrument(skip(self))]
    pub async fn get_master_release(&self, master_id: u64) -> Result<MasterRelease> {
        self.fetch(&Lookup::Master(master_id)).await
    }

    /// Look up an artist by exact Discogs name, e.g. `"Theo (3)"`.
    ///
    /// With `include_releases` the artist's discography is returned in
    /// [`Artist::releases`].
    ///
    /// # Example
    /// ```no_run
    /// # use discogs_ws_client::DiscogsClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DiscogsClient::new("MyApp/0.1")?;
    /// let artist = client.get_artist("Theo (3)", false).await?;
    /// assert_eq!(artist.realname.as_deref(), Some("Mickaël Desfrênes"));
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, name), fields(artist = name))]
    pub async fn get_artist(&self, name: &str, include_releases: bool) -> Result<Artist> {
        self.fetch(&Lookup::artist(name, include_releases)).await
    }

    /// Look up a label by exact Discogs name.
    #[instrument(skip(self, name), fields(label = name))]
    pub async fn get_label(&self, name: &str, include_releases: bool) -> Result<Label> {
        self.fetch(&Lookup::label(name, include_releases)).await
    }

    /// Free-text search. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        page: u32,
    ) -> Result<SearchResults> {
        self.fetch(&Lookup::search(query, search_type, page)).await
    }

    /// Perform `lookup` and return the unwrapped document without mapping it
    /// onto a result type.
    #[instrument(skip(self))]
    pub async fn get_raw(&self, lookup: &Lookup) -> Result<Value> {
        let url = lookup.url(&self.base_url)?;
        let body = self.get(url).await?;
        let document: Value = serde_json::from_str(&body)?;
        unwrap_envelope(document, lookup.envelope_key())
    }

    async fn fetch<T: DeserializeOwned>(&self, lookup: &Lookup) -> Result<T> {
        let payload = self.get_raw(lookup).await?;
        serde_json::from_value(payload).map_err(|e| DiscogsError::UnexpectedShape {
            path: format!("resp.{}", lookup.envelope_key()),
            reason: e.to_string(),
        })
    }

    async fn get(&self, url: Url) -> Result<String> {
        debug!(target: "discogs", %url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(target: "discogs", %status, "response status");

        let body = response.error_for_status()?.text().await?;
        trace!(target: "discogs", "response body: {}", body);

        Ok(body)
    }
}

/// Extract `resp.<key>` from a decoded response document.
pub(crate) fn unwrap_envelope(document: Value, key: &'static str) -> Result<Value> {
    let Value::Object(mut root) = document else {
        return Err(shape("", "expected a JSON object"));
    };

    let Some(Value::Object(mut resp)) = root.remove("resp") else {
        return Err(shape("resp", "missing or not an object"));
    };

    match resp.remove(key) {
        Some(payload) if !payload.is_null() => Ok(payload),
        _ => {
            let reason = match resp.get("error").and_then(Value::as_str) {
                Some(message) => format!("missing (server said: {message})"),
                None => "missing".to_string(),
            };
            Err(shape(&format!("resp.{key}"), &reason))
        }
    }
}

fn shape(path: &str, reason: &str) -> DiscogsError {
    DiscogsError::UnexpectedShape {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Builder for configuring a Discogs client.
#[derive(Debug, Clone)]
pub struct DiscogsClientBuilder {
    user_agent: String,
    base_url: String,
    timeout: Duration,
}

impl DiscogsClientBuilder {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            base_url: DISCOGS_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async client.
    pub fn build(self) -> Result<DiscogsClient> {
        // Blank agents are rejected; anything else is sent exactly as given.
        if self.user_agent.trim().is_empty() || HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(DiscogsError::InvalidUserAgent(self.user_agent));
        }

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| DiscogsError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(DiscogsError::InvalidBaseUrl(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()?;

        debug!(target: "discogs", %base_url, user_agent = %self.user_agent, "initialized Discogs client");

        Ok(DiscogsClient {
            client,
            base_url,
            user_agent: self.user_agent,
        })
    }

    /// Build the blocking facade over the async client.
    pub fn build_blocking(self) -> Result<blocking::DiscogsClient> {
        blocking::DiscogsClient::from_async(self.build()?)
    }
}
