//! SQLite content store - a disposable projection of the content files
//!
//! Rows are derived from the JSON content directory by [`sync`] (full
//! clear + reinsert) and queried by the HTTP API. Contact messages are
//! the only rows the store owns outright.

pub mod sync;

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

use crate::content::{
    ContactMessage, ContactMessageData, Essay, EssayData, MusicRelease, MusicReleaseData, Quote,
    QuoteData, Section, SectionData,
};

/// Handle on the content database
#[derive(Debug, Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    /// Open (creating if needed) the database at the given path
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let store = Self { pool };
        store.create_tables().await?;
        Ok(store)
    }

    /// Open an in-memory database (tests, previews)
    pub async fn open_in_memory() -> Result<Self> {
        // A single connection; each sqlite :memory: connection is its
        // own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.create_tables().await?;
        Ok(store)
    }

    async fn create_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                source TEXT NOT NULL,
                year TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS essays (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                year TEXT NOT NULL,
                publisher TEXT NOT NULL,
                description TEXT NOT NULL,
                cover_image TEXT,
                link TEXT,
                body TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS music (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                artist TEXT NOT NULL,
                year TEXT NOT NULL,
                label TEXT NOT NULL,
                format TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                content TEXT,
                sort_order INTEGER DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Quotes

    pub async fn quotes(&self) -> Result<Vec<Quote>> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(quotes)
    }

    /// A uniformly sampled quote, or None when the table is empty
    pub async fn random_quote(&self) -> Result<Option<Quote>> {
        let all = self.quotes().await?;
        if all.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..all.len());
        Ok(all.into_iter().nth(index))
    }

    pub async fn insert_quote(&self, quote: &QuoteData) -> Result<()> {
        sqlx::query("INSERT INTO quotes (text, source, year) VALUES (?, ?, ?)")
            .bind(&quote.text)
            .bind(&quote.source)
            .bind(&quote.year)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear_quotes(&self) -> Result<()> {
        sqlx::query("DELETE FROM quotes").execute(&self.pool).await?;
        Ok(())
    }

    // Essays

    pub async fn essays(&self) -> Result<Vec<Essay>> {
        let essays = sqlx::query_as::<_, Essay>("SELECT * FROM essays ORDER BY year DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(essays)
    }

    pub async fn essay(&self, id: i64) -> Result<Option<Essay>> {
        let essay = sqlx::query_as::<_, Essay>("SELECT * FROM essays WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(essay)
    }

    pub async fn insert_essay(&self, essay: &EssayData) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO essays (title, year, publisher, description, cover_image, link, body)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&essay.title)
        .bind(&essay.year)
        .bind(&essay.publisher)
        .bind(&essay.description)
        .bind(&essay.cover_image)
        .bind(&essay.link)
        .bind(&essay.body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear_essays(&self) -> Result<()> {
        sqlx::query("DELETE FROM essays").execute(&self.pool).await?;
        Ok(())
    }

    // Music

    pub async fn music(&self) -> Result<Vec<MusicRelease>> {
        let releases = sqlx::query_as::<_, MusicRelease>("SELECT * FROM music ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(releases)
    }

    pub async fn insert_music(&self, release: &MusicReleaseData) -> Result<()> {
        sqlx::query(
            "INSERT INTO music (title, artist, year, label, format) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&release.title)
        .bind(&release.artist)
        .bind(&release.year)
        .bind(&release.label)
        .bind(&release.format)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear_music(&self) -> Result<()> {
        sqlx::query("DELETE FROM music").execute(&self.pool).await?;
        Ok(())
    }

    // Sections

    pub async fn sections(&self) -> Result<Vec<Section>> {
        let sections = sqlx::query_as::<_, Section>("SELECT * FROM sections ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(sections)
    }

    /// The slug is the sole external lookup key for sections
    pub async fn section(&self, slug: &str) -> Result<Option<Section>> {
        let section = sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(section)
    }

    pub async fn insert_section(&self, section: &SectionData) -> Result<()> {
        sqlx::query("INSERT INTO sections (slug, title, content, sort_order) VALUES (?, ?, ?, ?)")
            .bind(&section.slug)
            .bind(&section.title)
            .bind(&section.content)
            .bind(section.sort_order)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear_sections(&self) -> Result<()> {
        sqlx::query("DELETE FROM sections")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Contact messages

    pub async fn insert_contact_message(&self, message: &ContactMessageData) -> Result<()> {
        sqlx::query(
            "INSERT INTO contact_messages (name, email, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>> {
        let messages =
            sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str) -> QuoteData {
        QuoteData {
            text: text.to_string(),
            source: "Interview".to_string(),
            year: "1977".to_string(),
        }
    }

    #[tokio::test]
    async fn test_quote_round_trip() {
        let store = ContentStore::open_in_memory().await.unwrap();

        store.insert_quote(&quote("first")).await.unwrap();
        store.insert_quote(&quote("second")).await.unwrap();

        let quotes = store.quotes().await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "first");
        assert_eq!(quotes[0].id, 1);

        store.clear_quotes().await.unwrap();
        assert!(store.quotes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_random_quote_on_empty_store() {
        let store = ContentStore::open_in_memory().await.unwrap();
        assert!(store.random_quote().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_random_quote_samples_existing_rows() {
        let store = ContentStore::open_in_memory().await.unwrap();
        store.insert_quote(&quote("only")).await.unwrap();

        let sampled = store.random_quote().await.unwrap().unwrap();
        assert_eq!(sampled.text, "only");
    }

    #[tokio::test]
    async fn test_essays_ordered_by_year_descending() {
        let store = ContentStore::open_in_memory().await.unwrap();
        for year in ["1982", "1996", "1977"] {
            store
                .insert_essay(&EssayData {
                    title: format!("Work of {}", year),
                    year: year.to_string(),
                    publisher: "Press".to_string(),
                    description: String::new(),
                    cover_image: None,
                    link: None,
                    body: None,
                })
                .await
                .unwrap();
        }

        let essays = store.essays().await.unwrap();
        let years: Vec<_> = essays.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1996", "1982", "1977"]);

        let found = store.essay(essays[0].id).await.unwrap();
        assert!(found.is_some());
        assert!(store.essay(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_section_lookup_by_slug() {
        let store = ContentStore::open_in_memory().await.unwrap();
        store
            .insert_section(&SectionData {
                slug: "biography".to_string(),
                title: "Biography".to_string(),
                content: Some("BIO\n\nProse.".to_string()),
                sort_order: Some(1),
            })
            .await
            .unwrap();

        let section = store.section("biography").await.unwrap().unwrap();
        assert_eq!(section.title, "Biography");
        assert_eq!(section.sort_order, Some(1));
        assert!(store.section("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_contact_message_insert() {
        let store = ContentStore::open_in_memory().await.unwrap();
        store
            .insert_contact_message(&ContactMessageData {
                name: "Reader".to_string(),
                email: "reader@example.com".to_string(),
                message: "Hello".to_string(),
            })
            .await
            .unwrap();

        let messages = store.contact_messages().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].email, "reader@example.com");
    }
}
