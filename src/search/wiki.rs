// src/search/wiki.rs
// Live Wikipedia resolver: GET the article, keep its in-namespace article links.

use super::{LinkResolver, NodeId, ResolveError};
use crate::config::consts::HOST;
use crate::core::net::HttpClient;
use crate::specs::links::article_links;

pub struct WikiLinkResolver {
    client: HttpClient,
    host: String,
}

impl WikiLinkResolver {
    pub fn new(client: HttpClient) -> Self {
        Self { client, host: s!(HOST) }
    }

    /// Prefix used to absolutize `/wiki/...` links (other language editions, mirrors).
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = s!(host.trim_end_matches('/'));
        self
    }
}

impl LinkResolver for WikiLinkResolver {
    fn resolve(&mut self, node: &str) -> Result<Vec<NodeId>, ResolveError> {
        let html = self.client.get_text(node)?;
        Ok(article_links(&html, &self.host))
    }
}
