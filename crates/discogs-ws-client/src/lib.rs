// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for the Discogs web service.
//!
//! Covers release, master release, artist, label and search lookups. Each
//! call issues one GET request, decodes the JSON `resp` envelope and returns
//! the typed payload found under it. An async client and a blocking facade
//! are provided.

pub mod blocking;
pub mod client;
pub mod error;
pub mod lookup;
pub mod models;

pub use client::{DiscogsClient, DiscogsClientBuilder, DISCOGS_API_BASE};
pub use error::{DiscogsError, Result};
pub use lookup::Lookup;
pub use models::{
    Artist, ArtistCredit, Format, Image, Label, LabelCredit, MasterRelease, Release,
    ReleaseSummary, SearchPage, SearchResult, SearchResults, SearchType, Track,
};
