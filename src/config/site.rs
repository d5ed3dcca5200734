//! Site configuration (site.json)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Site-wide configuration, loaded once and passed explicitly to every
/// consumer (the server state, the exporter's page chrome).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub subtitle: String,
    pub author_name: String,
    pub author_image: String,
    pub navigation: Vec<NavItem>,
    pub contact_form_endpoint: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "The Archive".to_string(),
            subtitle: String::new(),
            author_name: "Author Name".to_string(),
            author_image: String::new(),
            navigation: Vec::new(),
            contact_form_endpoint: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a site.json file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// One navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

impl NavItem {
    /// Resolve this entry's path into a route, once, at the routing
    /// boundary.
    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }
}

/// The closed set of places a navigation path can lead.
///
/// Paths are resolved into variants here instead of being compared as
/// strings wherever a page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Essays,
    Essay { id: i64 },
    Music,
    Quotes,
    Contact,
    Section { slug: String },
    External { url: String },
}

impl Route {
    pub fn parse(path: &str) -> Route {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Route::External {
                url: path.to_string(),
            };
        }

        let trimmed = path.trim_start_matches('/').trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "essays" | "books" => Route::Essays,
            "music" => Route::Music,
            "quotes" => Route::Quotes,
            "contact" => Route::Contact,
            other => {
                if let Some(id) = other
                    .strip_prefix("essays/")
                    .and_then(|rest| rest.parse::<i64>().ok())
                {
                    Route::Essay { id }
                } else {
                    Route::Section {
                        slug: other.to_string(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "The Archive");
        assert!(config.navigation.is_empty());
        assert!(config.contact_form_endpoint.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "title": "Richard Hell",
            "subtitle": "Writer",
            "authorName": "Richard Hell",
            "authorImage": "/assets/author.jpg",
            "navigation": [
                {"label": "Home", "path": "/"},
                {"label": "Biography", "path": "/biography"}
            ]
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Richard Hell");
        assert_eq!(config.author_name, "Richard Hell");
        assert_eq!(config.navigation.len(), 2);
        assert_eq!(config.navigation[1].route(), Route::parse("/biography"));
    }

    #[test]
    fn test_route_resolution() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/essays"), Route::Essays);
        assert_eq!(Route::parse("/books"), Route::Essays);
        assert_eq!(Route::parse("/essays/3"), Route::Essay { id: 3 });
        assert_eq!(Route::parse("/music"), Route::Music);
        assert_eq!(Route::parse("/quotes"), Route::Quotes);
        assert_eq!(Route::parse("/contact"), Route::Contact);
        assert_eq!(
            Route::parse("/biography"),
            Route::Section {
                slug: "biography".to_string()
            }
        );
        assert_eq!(
            Route::parse("https://example.com/elsewhere"),
            Route::External {
                url: "https://example.com/elsewhere".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_essay_path_is_a_section() {
        assert_eq!(
            Route::parse("/essays/latest"),
            Route::Section {
                slug: "essays/latest".to_string()
            }
        );
    }
}
