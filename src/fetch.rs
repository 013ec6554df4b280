//! Fetching bundled scripts and source maps.
//!
//! Network access is the one environmental dependency of the resolver, so
//! it sits behind the [`ScriptSource`] port: the CLI injects
//! [`HttpScriptSource`], tests and offline replays inject
//! [`StaticScriptSource`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// A successfully fetched document.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub url: String,
    pub text: String,
}

/// Port for retrieving bundled scripts and source-map documents.
#[allow(async_fn_in_trait)]
pub trait ScriptSource {
    /// Fetch `url` and return its body as UTF-8 text.
    ///
    /// Only a 2xx response with a readable body succeeds; everything else
    /// fails the operation for that URL.
    async fn fetch(&self, url: &str) -> Result<FetchedFile>;
}

/// Plain-GET HTTP source backed by reqwest.
///
/// `Content-Type` is deliberately ignored; bundlers serve scripts and
/// maps under a variety of types.
pub struct HttpScriptSource {
    client: reqwest::Client,
}

impl HttpScriptSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ScriptSource for HttpScriptSource {
    async fn fetch(&self, url: &str) -> Result<FetchedFile> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request for {} failed", url))?;

        if !response.status().is_success() {
            bail!("request for {} returned {}", url, response.status());
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("could not read body of {}", url))?;

        Ok(FetchedFile {
            url: url.to_string(),
            text,
        })
    }
}

/// Deterministic in-memory source.
///
/// Serves only the documents registered up front and counts how often
/// each URL is requested, which lets tests assert the resolver's
/// fetch-once behavior.
#[derive(Default)]
pub struct StaticScriptSource {
    files: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl StaticScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `url`.
    pub fn with_file(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(url.into(), text.into());
        self
    }

    /// How many times `url` has been requested.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches
            .lock()
            .expect("fetch counter poisoned")
            .get(url)
            .copied()
            .unwrap_or(0)
    }
}

impl ScriptSource for StaticScriptSource {
    async fn fetch(&self, url: &str) -> Result<FetchedFile> {
        *self
            .fetches
            .lock()
            .expect("fetch counter poisoned")
            .entry(url.to_string())
            .or_insert(0) += 1;

        match self.files.get(url) {
            Some(text) => Ok(FetchedFile {
                url: url.to_string(),
                text: text.clone(),
            }),
            None => bail!("no document registered for {}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fetch::*;

    #[tokio::test]
    async fn test_static_source_serves_registered_files() {
        let source = StaticScriptSource::new().with_file("https://cdn.test/a.js", "var a = 1;");

        let file = source.fetch("https://cdn.test/a.js").await.unwrap();
        assert_eq!(file.url, "https://cdn.test/a.js");
        assert_eq!(file.text, "var a = 1;");
    }

    #[tokio::test]
    async fn test_static_source_fails_unknown_urls() {
        let source = StaticScriptSource::new();
        assert!(source.fetch("https://cdn.test/missing.js").await.is_err());
    }

    #[tokio::test]
    async fn test_static_source_counts_fetches() {
        let source = StaticScriptSource::new().with_file("https://cdn.test/a.js", "var a = 1;");

        assert_eq!(source.fetch_count("https://cdn.test/a.js"), 0);
        source.fetch("https://cdn.test/a.js").await.unwrap();
        source.fetch("https://cdn.test/a.js").await.unwrap();
        assert_eq!(source.fetch_count("https://cdn.test/a.js"), 2);
    }
}
