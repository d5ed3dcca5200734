//! Content directory - the editable JSON files that feed the store
//!
//! The content directory is the system's source of truth. The store is a
//! disposable projection of it, and the admin API writes back to it.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::{EssayData, MusicReleaseData, QuoteData, SectionData};

pub const SITE_FILE: &str = "site.json";
pub const QUOTES_FILE: &str = "quotes.json";
pub const ESSAYS_FILE: &str = "essays.json";
pub const MUSIC_FILE: &str = "music.json";
pub const SECTIONS_FILE: &str = "sections.json";

/// Handle on the content directory
#[derive(Debug, Clone)]
pub struct ContentDir {
    dir: PathBuf,
}

impl ContentDir {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read and deserialize one content file
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.file_path(name);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Read one content file as untyped JSON (admin pass-through)
    pub fn read_value(&self, name: &str) -> Result<Value> {
        self.read(name)
    }

    /// Overwrite one content file, pretty-printed with a trailing newline
    pub fn write_value(&self, name: &str, value: &Value) -> Result<()> {
        let path = self.file_path(name);
        let pretty = serde_json::to_string_pretty(value)?;
        fs::write(&path, format!("{}\n", pretty))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn quotes(&self) -> Result<Vec<QuoteData>> {
        self.read(QUOTES_FILE)
    }

    pub fn essays(&self) -> Result<Vec<EssayData>> {
        self.read(ESSAYS_FILE)
    }

    pub fn music(&self) -> Result<Vec<MusicReleaseData>> {
        self.read(MUSIC_FILE)
    }

    pub fn sections(&self) -> Result<Vec<SectionData>> {
        self.read(SECTIONS_FILE)
    }

    /// Look up one section by slug in sections.json
    pub fn section(&self, slug: &str) -> Result<Option<SectionData>> {
        Ok(self.sections()?.into_iter().find(|s| s.slug == slug))
    }

    /// All JSON files in the directory, for the snapshot export
    pub fn json_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn content_dir(files: &[(&str, &str)]) -> (TempDir, ContentDir) {
        let tmp = TempDir::new().unwrap();
        for (name, body) in files {
            fs::write(tmp.path().join(name), body).unwrap();
        }
        let dir = ContentDir::new(tmp.path());
        (tmp, dir)
    }

    #[test]
    fn test_read_sections() {
        let (_tmp, dir) = content_dir(&[(
            SECTIONS_FILE,
            r#"[{"slug":"biography","title":"Biography","content":"BIO\n\nProse.","sortOrder":1}]"#,
        )]);

        let sections = dir.sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].slug, "biography");
        assert_eq!(sections[0].sort_order, Some(1));

        let found = dir.section("biography").unwrap();
        assert!(found.is_some());
        assert!(dir.section("missing").unwrap().is_none());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let (_tmp, dir) = content_dir(&[]);
        let err = dir.quotes().unwrap_err();
        assert!(err.to_string().contains(QUOTES_FILE));
    }

    #[test]
    fn test_write_value_is_pretty_with_trailing_newline() {
        let (tmp, dir) = content_dir(&[]);
        let value = serde_json::json!([{"text": "t", "source": "s", "year": "1977"}]);
        dir.write_value(QUOTES_FILE, &value).unwrap();

        let raw = fs::read_to_string(tmp.path().join(QUOTES_FILE)).unwrap();
        assert!(raw.ends_with("}\n]\n") || raw.ends_with("]\n"));
        assert!(raw.contains('\n'));

        let quotes = dir.quotes().unwrap();
        assert_eq!(quotes[0].year, "1977");
    }

    #[test]
    fn test_json_files_lists_only_json() {
        let (tmp, dir) = content_dir(&[(QUOTES_FILE, "[]"), (SITE_FILE, "{}")]);
        fs::write(tmp.path().join("notes.txt"), "skip me").unwrap();

        let files = dir.json_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "json"));
    }
}
