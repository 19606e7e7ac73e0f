//! Inbound translation: load balancer payload into a handler request.
//!
//! # Responsibilities
//! - Pick the query and header sources (multi value form wins)
//! - Assemble the raw query string without re-encoding
//! - Resolve the body, decoding base64 when flagged
//! - Attach the load balancer record to the request context
//!
//! # Design Decisions
//! - Method and path are passed through untouched, even when empty;
//!   deciding what an empty method or path means is up to the handler
//! - The path is kept as a string: it has already been URL-decoded and may
//!   not be a valid URI anymore

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use url::form_urlencoded;

use crate::context::{Context, ContextKey};
use crate::error::{AdapterError, AdapterResult};
use crate::http::{Body, Headers};
use crate::payload::{AlbRequest, Elb};
use crate::security::limits;

/// Context key under which the load balancer record is stored.
pub const ELB_CONTEXT_KEY: ContextKey<Elb> = ContextKey::new("elb");

/// Path and raw query of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestUrl {
    path: String,
    raw_query: String,
}

impl RequestUrl {
    pub fn new(path: impl Into<String>, raw_query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_query: raw_query.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string exactly as assembled, still percent-encoded.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Decoded query pairs, in query string order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.raw_query.as_bytes())
            .into_owned()
            .collect()
    }

    /// First decoded value for `key`.
    pub fn query(&self, key: &str) -> Option<String> {
        form_urlencoded::parse(self.raw_query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Every decoded value for `key`, in query string order.
    pub fn query_all(&self, key: &str) -> Vec<String> {
        form_urlencoded::parse(self.raw_query.as_bytes())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }
}

impl fmt::Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw_query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.raw_query)
        }
    }
}

/// An HTTP request as seen by handlers.
#[derive(Debug)]
pub struct Request {
    method: String,
    url: RequestUrl,
    headers: Headers,
    body: Body,
    context: Context,
}

impl Request {
    pub fn new(method: impl Into<String>, url: RequestUrl) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Headers::new(),
            body: Body::empty(),
            context: Context::background(),
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Method token exactly as delivered.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &RequestUrl {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Load balancer record attached by the adapter.
    pub fn elb(&self) -> Option<&Elb> {
        self.context.value(&ELB_CONTEXT_KEY)
    }
}

/// Build the handler-facing request from a decoded payload.
///
/// `parent` is attached unchanged apart from the load balancer record.
pub fn to_http_request(payload: AlbRequest, parent: Context) -> AdapterResult<Request> {
    let raw_query = payload.query_source().to_query_string();
    let headers = payload.header_source().to_headers();

    let AlbRequest {
        request_context,
        http_method,
        path,
        body,
        is_base64_encoded,
        ..
    } = payload;

    let body = if is_base64_encoded {
        match STANDARD.decode(body.as_bytes()) {
            Ok(decoded) => Bytes::from(decoded),
            Err(source) => return Err(AdapterError::BodyDecode { body, source }),
        }
    } else {
        Bytes::from(body)
    };

    if limits::exceeds_body_limit(body.len()) {
        tracing::warn!(
            body_len = body.len(),
            limit = limits::MAX_BODY_BYTES,
            "Request body exceeds load balancer limit"
        );
    }

    let context = parent.with_value(&ELB_CONTEXT_KEY, request_context.elb);

    Ok(Request::new(http_method, RequestUrl::new(path, raw_query))
        .with_headers(headers)
        .with_body(body)
        .with_context(context))
}
