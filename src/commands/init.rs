//! Scaffold a content directory with starter files

use anyhow::Result;
use std::fs;
use std::path::Path;

const SITE_JSON: &str = r#"{
  "title": "The Archive",
  "subtitle": "Selected work",
  "authorName": "Author Name",
  "authorImage": "/assets/author.jpg",
  "navigation": [
    { "label": "Home", "path": "/" },
    { "label": "Biography", "path": "/biography" },
    { "label": "Essays", "path": "/essays" },
    { "label": "Music", "path": "/music" },
    { "label": "Quotes", "path": "/quotes" },
    { "label": "Contact", "path": "/contact" }
  ],
  "contactFormEndpoint": null
}
"#;

const QUOTES_JSON: &str = r#"[
  {
    "text": "The aesthetic was always about removal.",
    "source": "Interview",
    "year": "1980"
  }
]
"#;

const ESSAYS_JSON: &str = r#"[
  {
    "title": "First Collection",
    "year": "1996",
    "publisher": "Small Press",
    "description": "Selected essays and fragments.",
    "coverImage": null,
    "link": null,
    "body": "The page is a constraint.\n\nBreak the page."
  }
]
"#;

const MUSIC_JSON: &str = r#"[
  {
    "title": "First Record",
    "artist": "The Band",
    "year": "1977",
    "label": "Records Co.",
    "format": "LP"
  }
]
"#;

const SECTIONS_JSON: &str = r#"[
  {
    "slug": "biography",
    "title": "Biography",
    "content": "EARLY YEARS\n\nBorn somewhere, raised elsewhere.\n\nSELECTED WORK\n\nFirst Collection — 1996\nFirst Record — 1977",
    "sortOrder": 1
  },
  {
    "slug": "contact",
    "title": "Contact",
    "content": "For inquiries, use the form below.",
    "sortOrder": 2
  }
]
"#;

/// Create a content directory under the target with starter records
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(content_dir.join("assets"))?;

    let files = [
        ("site.json", SITE_JSON),
        ("quotes.json", QUOTES_JSON),
        ("essays.json", ESSAYS_JSON),
        ("music.json", MUSIC_JSON),
        ("sections.json", SECTIONS_JSON),
    ];

    for (name, body) in files {
        let path = content_dir.join(name);
        if path.exists() {
            tracing::warn!("Skipping existing {}", path.display());
            continue;
        }
        fs::write(&path, body)?;
    }

    Ok(())
}
