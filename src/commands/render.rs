//! Classify and render one piece of content to the terminal
//!
//! Sections go through the full classifier/renderer pipeline; essay
//! bodies are paragraph-only. With `--url` the content comes from a
//! remote site (live API, then snapshot fallback) instead of the local
//! content directory.

use anyhow::{anyhow, Result};

use crate::content::{blocks, render, Section};
use crate::fetch::ContentClient;
use crate::Folio;

/// What to render
pub enum Target {
    Section(String),
    Essay(i64),
}

pub async fn run(folio: &Folio, target: Target, url: Option<&str>) -> Result<()> {
    match target {
        Target::Section(slug) => {
            let section = load_section(folio, &slug, url).await?;
            println!("{}", section.title);
            println!();

            let content = section.content.as_deref().unwrap_or_default();
            let nodes = render::render(&blocks::classify(content));
            println!("{}", render::to_text(&nodes));
        }
        Target::Essay(id) => {
            let (title, body) = load_essay(folio, id, url).await?;
            println!("{}", title);
            println!();
            println!("{}", blocks::paragraphs(&body).join("\n\n"));
        }
    }

    Ok(())
}

async fn load_section(folio: &Folio, slug: &str, url: Option<&str>) -> Result<Section> {
    if let Some(base) = url {
        let section = ContentClient::new(base).fetch_section(slug).await?;
        return Ok(section);
    }

    let data = folio
        .content()
        .section(slug)?
        .ok_or_else(|| anyhow!("no section with slug '{}'", slug))?;
    Ok(Section {
        id: 0,
        slug: data.slug,
        title: data.title,
        content: data.content,
        sort_order: data.sort_order,
    })
}

async fn load_essay(folio: &Folio, id: i64, url: Option<&str>) -> Result<(String, String)> {
    let essay = if let Some(base) = url {
        ContentClient::new(base).fetch_essay(id).await?
    } else {
        let data = folio.content().essays()?;
        let index = id.checked_sub(1).and_then(|i| usize::try_from(i).ok());
        let essay = index
            .and_then(|i| data.into_iter().nth(i))
            .ok_or_else(|| anyhow!("no essay with id {}", id))?;
        crate::content::Essay {
            id,
            title: essay.title,
            year: essay.year,
            publisher: essay.publisher,
            description: essay.description,
            cover_image: essay.cover_image,
            link: essay.link,
            body: essay.body,
        }
    };

    let body = essay
        .body
        .ok_or_else(|| anyhow!("essay {} has no body", id))?;
    Ok((essay.title, body))
}
