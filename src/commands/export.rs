//! Export the static snapshot
//!
//! The snapshot is the fetcher's fallback target and a complete static
//! hosting artifact: every content JSON file copied verbatim, every
//! section rendered to an HTML page, essay bodies rendered to detail
//! pages, and the assets directory copied through.

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::{Route, SiteConfig};
use crate::content::{blocks, render};
use crate::Folio;

pub fn run(folio: &Folio) -> Result<()> {
    let content = folio.content();
    let public_dir = &folio.public_dir;
    fs::create_dir_all(public_dir)?;

    // Content files, verbatim
    let json_files = content.json_files()?;
    for path in &json_files {
        if let Some(name) = path.file_name() {
            fs::copy(path, public_dir.join(name))?;
        }
    }
    tracing::info!("Copied {} content files", json_files.len());

    check_navigation(&folio.config, &content)?;

    // Section pages
    let sections_dir = public_dir.join("sections");
    fs::create_dir_all(&sections_dir)?;
    let mut rendered = 0;
    for section in content.sections()? {
        let text = match &section.content {
            Some(text) => text,
            None => continue,
        };
        let nodes = render::render(&blocks::classify(text));
        let page = page_html(&folio.config, &section.title, &render::to_html(&nodes));
        fs::write(sections_dir.join(format!("{}.html", section.slug)), page)?;
        rendered += 1;
    }
    tracing::info!("Rendered {} sections", rendered);

    // Essay detail pages; ids are positional, matching the snapshot
    // fetch path
    let essays_dir = public_dir.join("essays");
    fs::create_dir_all(&essays_dir)?;
    for (index, essay) in content.essays()?.iter().enumerate() {
        let body = match &essay.body {
            Some(body) => body,
            None => continue,
        };
        let html: String = blocks::paragraphs(body)
            .iter()
            .map(|p| format!("<p>{}</p>\n", escape(p)))
            .collect();
        let page = page_html(&folio.config, &essay.title, &html);
        fs::write(essays_dir.join(format!("{}.html", index + 1)), page)?;
    }

    copy_assets(&content.file_path("assets"), public_dir)?;

    println!("Exported snapshot to {}", public_dir.display());
    Ok(())
}

/// Warn when a navigation entry points at a section that does not exist
fn check_navigation(config: &SiteConfig, content: &crate::content::ContentDir) -> Result<()> {
    let sections = content.sections()?;

    for item in &config.navigation {
        if let Route::Section { slug } = item.route() {
            if !sections.iter().any(|s| s.slug == slug) {
                tracing::warn!("Navigation entry '{}' points at missing section '{}'", item.label, slug);
            }
        }
    }

    Ok(())
}

/// Wrap a rendered fragment in a minimal page with the site chrome
fn page_html(config: &SiteConfig, title: &str, body: &str) -> String {
    let nav: String = config
        .navigation
        .iter()
        .map(|item| format!("<a href=\"{}\">{}</a>\n", escape(&item.path), escape(&item.label)))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} — {}</title>\n</head>\n<body>\n<header>\n<h1>{}</h1>\n<nav>\n{}</nav>\n</header>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        escape(&config.title),
        escape(&config.title),
        nav,
        body
    )
}

fn copy_assets(assets_dir: &Path, public_dir: &Path) -> Result<()> {
    if !assets_dir.exists() {
        return Ok(());
    }

    let target = public_dir.join("assets");
    for entry in WalkDir::new(assets_dir).into_iter().filter_map(|e| e.ok()) {
        let relative = entry.path().strip_prefix(assets_dir)?;
        let dest = target.join(relative);
        if entry.path().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
        }
    }

    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_snapshot() {
        let tmp = TempDir::new().unwrap();
        init::init_site(tmp.path()).unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        run(&folio).unwrap();

        let public = tmp.path().join("public");
        assert!(public.join("quotes.json").exists());
        assert!(public.join("sections.json").exists());

        let bio = fs::read_to_string(public.join("sections/biography.html")).unwrap();
        assert!(bio.contains("<h3 class=\"section-label\">EARLY YEARS</h3>"));
        assert!(bio.contains("<span class=\"line-note\">1996</span>"));

        let essay = fs::read_to_string(public.join("essays/1.html")).unwrap();
        assert!(essay.contains("<p>Break the page.</p>"));
    }
}
