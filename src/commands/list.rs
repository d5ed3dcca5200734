//! List content from the content directory or a remote site

use anyhow::{bail, Result};

use crate::content::blocks;
use crate::fetch::ContentClient;
use crate::Folio;

/// List content by type
pub async fn run(folio: &Folio, content_type: &str, url: Option<&str>) -> Result<()> {
    match url {
        Some(base) => run_remote(base, content_type).await,
        None => run_local(folio, content_type),
    }
}

fn run_local(folio: &Folio, content_type: &str) -> Result<()> {
    let content = folio.content();

    match content_type {
        "section" | "sections" => {
            let sections = content.sections()?;
            println!("Sections ({}):", sections.len());
            for section in sections {
                let block_count = section
                    .content
                    .as_deref()
                    .map(|text| blocks::classify(text).len())
                    .unwrap_or(0);
                println!(
                    "  {} - {} [{} blocks]",
                    section.slug, section.title, block_count
                );
            }
        }
        "quote" | "quotes" => {
            let quotes = content.quotes()?;
            println!("Quotes ({}):", quotes.len());
            for quote in quotes {
                println!("  {} — {} ({})", quote.text, quote.source, quote.year);
            }
        }
        "essay" | "essays" => {
            let essays = content.essays()?;
            println!("Essays ({}):", essays.len());
            for essay in essays {
                println!("  {} - {} [{}]", essay.year, essay.title, essay.publisher);
            }
        }
        "music" => {
            let releases = content.music()?;
            println!("Releases ({}):", releases.len());
            for release in releases {
                println!(
                    "  {} - {} by {} [{}, {}]",
                    release.year, release.title, release.artist, release.label, release.format
                );
            }
        }
        other => {
            bail!("unknown content type '{}' (expected sections, quotes, essays, or music)", other);
        }
    }

    Ok(())
}

async fn run_remote(base: &str, content_type: &str) -> Result<()> {
    let client = ContentClient::new(base);

    match content_type {
        "quote" | "quotes" => {
            let quotes = client.fetch_quotes().await?;
            println!("Quotes ({}):", quotes.len());
            for quote in quotes {
                println!("  {} — {} ({})", quote.text, quote.source, quote.year);
            }
        }
        "essay" | "essays" => {
            let essays = client.fetch_essays().await?;
            println!("Essays ({}):", essays.len());
            for essay in essays {
                println!("  {} - {} [{}]", essay.year, essay.title, essay.publisher);
            }
        }
        "music" => {
            let releases = client.fetch_music().await?;
            println!("Releases ({}):", releases.len());
            for release in releases {
                println!(
                    "  {} - {} by {} [{}, {}]",
                    release.year, release.title, release.artist, release.label, release.format
                );
            }
        }
        other => {
            bail!(
                "cannot list '{}' from a remote site (expected quotes, essays, or music)",
                other
            );
        }
    }

    Ok(())
}
