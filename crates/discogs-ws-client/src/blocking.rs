// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronous facade over [`crate::DiscogsClient`].
//!
//! Each call blocks the current thread for exactly one request. Must not be
//! used from inside an async runtime; use the async client there instead.

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::client::{self, DiscogsClientBuilder};
use crate::error::{DiscogsError, Result};
use crate::lookup::Lookup;
use crate::models::{Artist, Label, MasterRelease, Release, SearchResults, SearchType};

/// Blocking Discogs client.
///
/// # Example
/// ```no_run
/// use discogs_ws_client::blocking::DiscogsClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DiscogsClient::new("MyApp/0.1")?;
/// let artist = client.get_artist("Theo (3)", false)?;
/// println!("{:?}", artist.realname);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DiscogsClient {
    inner: client::DiscogsClient,
    runtime: Runtime,
}

impl DiscogsClient {
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        Self::builder(user_agent).build_blocking()
    }

    pub fn builder(user_agent: impl Into<String>) -> DiscogsClientBuilder {
        DiscogsClientBuilder::new(user_agent)
    }

    /// Wrap an already configured async client.
    pub fn from_async(inner: client::DiscogsClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DiscogsError::Runtime)?;

        Ok(Self { inner, runtime })
    }

    /// The async client driven by this facade.
    pub fn inner(&self) -> &client::DiscogsClient {
        &self.inner
    }

    pub fn get_release(&self, release_id: u64) -> Result<Release> {
        self.runtime.block_on(self.inner.get_release(release_id))
    }

    pub fn get_master_release(&self, master_id: u64) -> Result<MasterRelease> {
        self.runtime.block_on(self.inner.get_master_release(master_id))
    }

    pub fn get_artist(&self, name: &str, include_releases: bool) -> Result<Artist> {
        self.runtime
            .block_on(self.inner.get_artist(name, include_releases))
    }

    pub fn get_label(&self, name: &str, include_releases: bool) -> Result<Label> {
        self.runtime
            .block_on(self.inner.get_label(name, include_releases))
    }

    pub fn search(&self, query: &str, search_type: SearchType, page: u32) -> Result<SearchResults> {
        self.runtime
            .block_on(self.inner.search(query, search_type, page))
    }

    pub fn get_raw(&self, lookup: &Lookup) -> Result<Value> {
        self.runtime.block_on(self.inner.get_raw(lookup))
    }
}
