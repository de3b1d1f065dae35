//! Fetches metadata from external pages for quotebacks: page title, author,
//! and favicon. Favicons are downloaded and stored locally so quotebacks
//! survive link rot.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::config::FetchConfig;

/// Best-effort metadata scraped from a page. Fields are empty strings when
/// nothing could be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub author: String,
    pub favicon_url: String,
}

/// A downloaded favicon, ready to be stored as a named media asset.
#[derive(Debug, Clone)]
pub struct FaviconFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

pub struct MetadataFetcher {
    client: Client,
}

impl MetadataFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch title, author and favicon URL from a page. Never fails: any
    /// network or HTTP error is logged and an empty result returned, so a
    /// save operation can always proceed.
    pub async fn fetch_page_metadata(&self, url: &str) -> PageMetadata {
        match self.get_text(url).await {
            Ok(body) => parse_page_metadata(&body, url),
            Err(e) => {
                warn!("Error fetching metadata from {}: {}", url, e);
                PageMetadata::default()
            }
        }
    }

    /// Download a favicon. Returns `None` on any error; the caller simply
    /// ends up without an icon.
    pub async fn download_favicon(&self, favicon_url: &str) -> Option<FaviconFile> {
        match self.get_bytes(favicon_url).await {
            Ok(bytes) => Some(FaviconFile {
                filename: favicon_filename(favicon_url),
                bytes,
            }),
            Err(e) => {
                warn!("Error downloading favicon from {}: {}", favicon_url, e);
                None
            }
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract metadata from an HTML document. Pure: the same bytes and URL
/// always produce the same result.
pub fn parse_page_metadata(html: &str, url: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    PageMetadata {
        title: extract_title(&document, url),
        author: extract_author(&document),
        favicon_url: extract_favicon_url(&document, url),
    }
}

fn meta_property(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[property='{}']", property)).ok()?;
    let element = document.select(&selector).next()?;
    let content = element.value().attr("content")?.trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

fn meta_name(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[name='{}']", name)).ok()?;
    let element = document.select(&selector).next()?;
    let content = element.value().attr("content")?.trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Page title: og:title, then twitter:title, then the `<title>` element,
/// then the URL itself.
fn extract_title(document: &Html, url: &str) -> String {
    if let Some(title) = meta_property(document, "og:title") {
        return title;
    }

    if let Some(title) = meta_name(document, "twitter:title") {
        return title;
    }

    let title_selector = Selector::parse("title").expect("static selector");
    if let Some(element) = document.select(&title_selector).next() {
        let text = element.text().collect::<String>();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    url.to_string()
}

/// Author: article:author, then the standard author meta tag, then
/// twitter:creator with any leading "@" stripped. Empty when absent.
fn extract_author(document: &Html) -> String {
    if let Some(author) = meta_property(document, "article:author") {
        return author;
    }

    if let Some(author) = meta_name(document, "author") {
        return author;
    }

    if let Some(creator) = meta_name(document, "twitter:creator") {
        return creator.trim_start_matches('@').to_string();
    }

    String::new()
}

/// Favicon URL: any `<link>` whose rel contains "icon", then
/// `rel="apple-touch-icon"`, then `{scheme}://{host}/favicon.ico`. Relative
/// hrefs are resolved against the page URL.
fn extract_favicon_url(document: &Html, base_url: &str) -> String {
    let link_selector = Selector::parse("link").expect("static selector");

    for element in document.select(&link_selector) {
        let rel = element.value().attr("rel").unwrap_or_default();
        if rel.to_lowercase().contains("icon") {
            if let Some(href) = non_empty_href(element.value().attr("href")) {
                if let Some(resolved) = resolve_href(base_url, href) {
                    return resolved;
                }
            }
        }
    }

    for element in document.select(&link_selector) {
        let rel = element.value().attr("rel").unwrap_or_default();
        if rel == "apple-touch-icon" {
            if let Some(href) = non_empty_href(element.value().attr("href")) {
                if let Some(resolved) = resolve_href(base_url, href) {
                    return resolved;
                }
            }
        }
    }

    default_favicon_url(base_url)
}

fn non_empty_href(href: Option<&str>) -> Option<&str> {
    href.filter(|h| !h.is_empty())
}

fn resolve_href(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let resolved = base.join(href).ok()?;
    Some(resolved.to_string())
}

fn default_favicon_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{}://{}:{}/favicon.ico", parsed.scheme(), host, port),
                None => format!("{}://{}/favicon.ico", parsed.scheme(), host),
            }
        }
        Err(_) => String::new(),
    }
}

/// Filename for a downloaded favicon: the last path segment of its URL, or
/// "favicon.ico" when that segment carries no extension.
pub fn favicon_filename(favicon_url: &str) -> String {
    let path = Url::parse(favicon_url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();

    if last.contains('.') {
        last.to_string()
    } else {
        "favicon.ico".to_string()
    }
}
