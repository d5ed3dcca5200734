//! Remote content client with static-snapshot fallback
//!
//! Each resource is fetched with one attempt against the live API and,
//! if that fails for any reason, one attempt against the exported
//! snapshot file of the same logical name. No retries, no backoff: the
//! fallback exists so the same content surfaces whether a site is backed
//! by the live server or by a static export.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{
    Essay, EssayData, MusicRelease, MusicReleaseData, Quote, QuoteData, Section, SectionData,
};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Both the live and the snapshot attempt failed
    #[error("failed to fetch {0} (live and snapshot)")]
    FetchFailed(String),
    /// The snapshot was readable but the record is not in it
    #[error("not found: {0}")]
    NotFound(String),
}

/// Client for one remote site
pub struct ContentClient {
    base_url: String,
    http: reqwest::Client,
}

impl ContentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// One attempt against the live API; None on any failure
    async fn try_live<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }

    /// One attempt against the snapshot file
    async fn get_snapshot<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|_| FetchError::FetchFailed(resource.to_string()))?;
        if !response.status().is_success() {
            return Err(FetchError::FetchFailed(resource.to_string()));
        }
        response
            .json()
            .await
            .map_err(|_| FetchError::FetchFailed(resource.to_string()))
    }

    pub async fn fetch_site(&self) -> Result<SiteConfig, FetchError> {
        if let Some(site) = self.try_live("/api/site").await {
            return Ok(site);
        }
        self.get_snapshot("/site.json", "site").await
    }

    pub async fn fetch_quotes(&self) -> Result<Vec<Quote>, FetchError> {
        if let Some(quotes) = self.try_live("/api/quotes").await {
            return Ok(quotes);
        }
        let data: Vec<QuoteData> = self.get_snapshot("/quotes.json", "quotes").await?;
        Ok(quotes_with_ids(data))
    }

    pub async fn fetch_essays(&self) -> Result<Vec<Essay>, FetchError> {
        if let Some(essays) = self.try_live("/api/essays").await {
            return Ok(essays);
        }
        let data: Vec<EssayData> = self.get_snapshot("/essays.json", "essays").await?;
        Ok(essays_with_ids(data))
    }

    pub async fn fetch_essay(&self, id: i64) -> Result<Essay, FetchError> {
        self.fetch_essays()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| FetchError::NotFound(format!("essay {}", id)))
    }

    pub async fn fetch_music(&self) -> Result<Vec<MusicRelease>, FetchError> {
        if let Some(releases) = self.try_live("/api/music").await {
            return Ok(releases);
        }
        let data: Vec<MusicReleaseData> = self.get_snapshot("/music.json", "music").await?;
        Ok(music_with_ids(data))
    }

    /// Fetch a single section by slug. The snapshot path loads the whole
    /// sections file and selects from it.
    pub async fn fetch_section(&self, slug: &str) -> Result<Section, FetchError> {
        if let Some(section) = self.try_live(&format!("/api/sections/{}", slug)).await {
            return Ok(section);
        }

        let data: Vec<SectionData> = self.get_snapshot("/sections.json", "sections").await?;
        sections_with_ids(data)
            .into_iter()
            .find(|s| s.slug == slug)
            .ok_or_else(|| FetchError::NotFound(format!("section {}", slug)))
    }
}

// Snapshot files carry no ids; synthesize them from position, the way
// the live store numbers a freshly synced table.

fn quotes_with_ids(data: Vec<QuoteData>) -> Vec<Quote> {
    data.into_iter()
        .enumerate()
        .map(|(i, q)| Quote {
            id: i as i64 + 1,
            text: q.text,
            source: q.source,
            year: q.year,
        })
        .collect()
}

fn essays_with_ids(data: Vec<EssayData>) -> Vec<Essay> {
    data.into_iter()
        .enumerate()
        .map(|(i, e)| Essay {
            id: i as i64 + 1,
            title: e.title,
            year: e.year,
            publisher: e.publisher,
            description: e.description,
            cover_image: e.cover_image,
            link: e.link,
            body: e.body,
        })
        .collect()
}

fn music_with_ids(data: Vec<MusicReleaseData>) -> Vec<MusicRelease> {
    data.into_iter()
        .enumerate()
        .map(|(i, m)| MusicRelease {
            id: i as i64 + 1,
            title: m.title,
            artist: m.artist,
            year: m.year,
            label: m.label,
            format: m.format,
        })
        .collect()
}

fn sections_with_ids(data: Vec<SectionData>) -> Vec<Section> {
    data.into_iter()
        .enumerate()
        .map(|(i, s)| Section {
            id: i as i64 + 1,
            slug: s.slug,
            title: s.title,
            content: s.content,
            sort_order: s.sort_order,
        })
        .collect()
}
