//! Content sync - derives store rows from the JSON content files
//!
//! Each resource is fully cleared and reinserted, so the store always
//! mirrors the files after a successful run. All files are parsed before
//! anything is cleared; a parse failure aborts the run with the store
//! untouched. A failure midway leaves the store partially synced until
//! the next successful run (no rollback).

use anyhow::Result;

use super::ContentStore;
use crate::content::loader::{
    ContentDir, ESSAYS_FILE, MUSIC_FILE, QUOTES_FILE, SECTIONS_FILE,
};

/// Per-resource row counts from a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub quotes: usize,
    pub essays: usize,
    pub music: usize,
    pub sections: usize,
}

/// Rebuild the store from the content directory
pub async fn sync_from_json(store: &ContentStore, content: &ContentDir) -> Result<SyncReport> {
    let quotes = content.quotes()?;
    let essays = content.essays()?;
    let music = content.music()?;
    let sections = content.sections()?;

    store.clear_quotes().await?;
    for quote in &quotes {
        store.insert_quote(quote).await?;
    }
    tracing::info!("Synced {} quotes from {}", quotes.len(), QUOTES_FILE);

    store.clear_essays().await?;
    for essay in &essays {
        store.insert_essay(essay).await?;
    }
    tracing::info!("Synced {} essays from {}", essays.len(), ESSAYS_FILE);

    store.clear_music().await?;
    for release in &music {
        store.insert_music(release).await?;
    }
    tracing::info!("Synced {} releases from {}", music.len(), MUSIC_FILE);

    store.clear_sections().await?;
    for section in &sections {
        store.insert_section(section).await?;
    }
    tracing::info!("Synced {} sections from {}", sections.len(), SECTIONS_FILE);

    Ok(SyncReport {
        quotes: quotes.len(),
        essays: essays.len(),
        music: music.len(),
        sections: sections.len(),
    })
}
