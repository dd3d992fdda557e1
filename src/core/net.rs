// src/core/net.rs
// Blocking HTTP GET. One client per pipeline; it is cheap to clone and safe
// to share across the scrape workers.

use std::{path::Path, time::Duration};

use thiserror::Error;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status} {url}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("no response for {url}")]
    Unfinished { url: String },

    #[error("could not save {path}: {source}")]
    Save { path: String, source: std::io::Error },
}

/// A fetched document and the URL it was finally served from
/// (after redirects).
#[derive(Clone, Debug)]
pub struct Page {
    pub url: String,
    pub body: String,
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// GET `url` with optional query parameters. Any non-2xx status is an error.
    pub fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<Page, FetchError> {
        let mut req = self.inner.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = req.send()?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        if !status.is_success() {
            return Err(FetchError::Status { url: final_url, status });
        }

        let body = resp.text()?;
        tracing::debug!("GET {final_url} -> {} bytes", body.len());
        Ok(Page { url: final_url, body })
    }

    /// Shorthand for a parameterless fetch returning only the body.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetch(url, &[]).map(|p| p.body)
    }
}

/// Anything that can hand back a page body for a URL. The scrape pipelines
/// fetch through this so they can be driven by canned pages.
pub trait PageSource: Sync {
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

impl PageSource for HttpClient {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        HttpClient::get_text(self, url)
    }
}

/// `scheme://authority` of an absolute URL, used to absolutize `/wiki/...`
/// links. Anything without a scheme is returned unchanged.
pub fn origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else { return url };
    let rest = scheme_end + 3;
    match url[rest..].find('/') {
        Some(slash) => &url[..rest + slash],
        None => url,
    }
}

/// Get an HTML page and return its contents.
///
/// When `output` is set the file receives the final request URL on the first
/// line, followed by the response body.
pub fn get_html(
    client: &HttpClient,
    url: &str,
    params: &[(String, String)],
    output: Option<&Path>,
) -> Result<String, FetchError> {
    let page = client.fetch(url, params)?;

    if let Some(path) = output {
        let contents = join!(&page.url, "\n", &page.body);
        crate::file::save(path, &contents).map_err(|source| FetchError::Save {
            path: path.display().to_string(),
            source,
        })?;
    }

    Ok(page.body)
}

/// Parse `key=value` pairs (CLI `--param`) into query parameters.
pub fn parse_params<S: AsRef<str>>(raw: &[S]) -> Result<Vec<(String, String)>, String> {
    raw.iter()
        .map(|p| {
            let p = p.as_ref();
            let (k, v) = p.split_once('=').ok_or_else(|| format!("Expected key=value, got: {p}"))?;
            if k.trim().is_empty() {
                return Err(format!("Empty parameter name in: {p}"));
            }
            Ok((s!(k.trim()), s!(v)))
        })
        .collect()
}
