use reqwest::{Method, Url};

/// Expected content category of a request.
///
/// Only `Document` changes routing behavior: a navigation whose fetch fails
/// with nothing cached is answered with the offline fallback document instead
/// of a bare 503.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Top-level navigable document.
    Document,
    /// Any subresource: script, style, image, data.
    Asset,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Document => write!(f, "document"),
            Destination::Asset => write!(f, "asset"),
        }
    }
}

/// An intercepted request, canonicalized for cache lookup.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
}

impl ResourceRequest {
    pub fn new(method: Method, url: Url, destination: Destination) -> Self {
        Self {
            method,
            url,
            destination,
        }
    }

    /// A GET request for a subresource.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url, Destination::Asset)
    }

    /// A GET request for a top-level document.
    pub fn navigation(url: Url) -> Self {
        Self::new(Method::GET, url, Destination::Document)
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Canonical cache key: method plus full URL.
    /// Effectively GET-only since non-GET requests are never intercepted.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_method_and_url() {
        let url = Url::parse("https://example.app/index.html").unwrap();
        let req = ResourceRequest::get(url);
        assert_eq!(req.cache_key(), "GET https://example.app/index.html");
    }

    #[test]
    fn test_same_url_different_method_has_different_key() {
        let url = Url::parse("https://example.app/submit").unwrap();
        let get = ResourceRequest::get(url.clone());
        let post = ResourceRequest::new(Method::POST, url, Destination::Asset);
        assert_ne!(get.cache_key(), post.cache_key());
        assert!(!post.is_get());
    }

    #[test]
    fn test_navigation_destination() {
        let url = Url::parse("https://example.app/").unwrap();
        let req = ResourceRequest::navigation(url);
        assert_eq!(req.destination, Destination::Document);
    }
}
