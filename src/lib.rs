//! folio: content engine and server for a personal author archive site
//!
//! The editable JSON files in the content directory are the source of
//! truth. A SQLite store is derived from them (full clear + reinsert)
//! and served over an HTTP API; section text is classified into typed
//! blocks and rendered to display nodes for the exported snapshot and
//! the terminal preview.

pub mod commands;
pub mod config;
pub mod content;
pub mod fetch;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::SiteConfig;
use content::loader::SITE_FILE;
use content::ContentDir;

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration (content/site.json)
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (editable JSON files)
    pub content_dir: PathBuf,
    /// Public (snapshot/output) directory
    pub public_dir: PathBuf,
    /// SQLite store path
    pub db_path: PathBuf,
}

impl Folio {
    /// Create a folio instance rooted at a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join("content");

        let config_path = content_dir.join(SITE_FILE);
        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        Ok(Self {
            config,
            content_dir: content_dir.clone(),
            public_dir: base_dir.join("public"),
            db_path: base_dir.join("folio.db"),
            base_dir,
        })
    }

    /// Handle on the content directory
    pub fn content(&self) -> ContentDir {
        ContentDir::new(&self.content_dir)
    }
}
