//! Route matching logic.
//!
//! # Responsibilities
//! - Match host header (exact match, case-insensitive)
//! - Match path (exact or prefix, case-sensitive)
//! - Match method token
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-insensitive
//! - Path and method matching are case-sensitive
//! - No regex to guarantee O(n) matching

use crate::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request) -> bool;
}

/// Matches the Host header.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: String,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            expected_host: host.into().to_lowercase(),
        }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, req: &Request) -> bool {
        req.headers()
            .get("host")
            .map(|h| h.to_lowercase() == self.expected_host)
            .unwrap_or(false)
    }
}

/// Matches the request path exactly.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    path: String,
}

impl PathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, req: &Request) -> bool {
        req.path() == self.path
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request) -> bool {
        req.path().starts_with(&self.prefix)
    }
}

/// Matches the method token as delivered (no case folding).
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: String,
}

impl MethodMatcher {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request) -> bool {
        req.method() == self.method
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request) -> bool {
        // All matchers must pass (AND)
        self.matchers.iter().all(|m| m.matches(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Headers, RequestUrl};

    fn request(method: &str, path: &str, host: Option<&str>) -> Request {
        let mut headers = Headers::new();
        if let Some(host) = host {
            headers.set("Host", host);
        }
        Request::new(method, RequestUrl::new(path, "")).with_headers(headers)
    }

    #[test]
    fn test_host_matcher() {
        let matcher = HostMatcher::new("example.com");

        assert!(matcher.matches(&request("GET", "/", Some("example.com"))));
        assert!(matcher.matches(&request("GET", "/", Some("EXAMPLE.COM")))); // Case insensitive
        assert!(!matcher.matches(&request("GET", "/", Some("other.com"))));
        assert!(!matcher.matches(&request("GET", "/", None)));
    }

    #[test]
    fn test_path_matchers() {
        let prefix = PathPrefixMatcher::new("/api");
        assert!(prefix.matches(&request("GET", "/api/v1", None)));
        assert!(!prefix.matches(&request("GET", "/images", None)));

        let exact = PathMatcher::new("/");
        assert!(exact.matches(&request("GET", "/", None)));
        assert!(!exact.matches(&request("GET", "/products", None)));
    }

    #[test]
    fn test_method_and_combination() {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new("POST")),
            Box::new(PathPrefixMatcher::new("/api")),
        ]);

        assert!(matcher.matches(&request("POST", "/api/items", None)));
        assert!(!matcher.matches(&request("post", "/api/items", None)));
        assert!(!matcher.matches(&request("POST", "/other", None)));
    }
}
