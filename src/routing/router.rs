//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Dispatch to the first matching route's handler
//! - Answer 404 when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan (acceptable for typical route counts)
//! - First match wins

use crate::handler::Handler;
use crate::http::header::CONTENT_TYPE;
use crate::http::{Request, ResponseWriter};
use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, PathMatcher};

/// A single route: a condition plus the handler it leads to.
pub struct Route {
    name: String,
    matcher: Box<dyn Matcher>,
    handler: Box<dyn Handler>,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of routes, itself a [`Handler`].
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route guarded by an arbitrary matcher.
    pub fn route<M, H>(mut self, name: impl Into<String>, matcher: M, handler: H) -> Self
    where
        M: Matcher + 'static,
        H: Handler + 'static,
    {
        self.routes.push(Route {
            name: name.into(),
            matcher: Box::new(matcher),
            handler: Box::new(handler),
        });
        self
    }

    /// Add a route for an exact path, any method.
    pub fn path<H: Handler + 'static>(self, path: &str, handler: H) -> Self {
        self.route(path, PathMatcher::new(path), handler)
    }

    /// Add a route for an exact method and path.
    pub fn method<H: Handler + 'static>(self, method: &str, path: &str, handler: H) -> Self {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(method)),
            Box::new(PathMatcher::new(path)),
        ]);
        self.route(format!("{method} {path}"), matcher, handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn match_request(&self, req: &Request) -> Option<&Route> {
        self.routes.iter().find(|r| r.matcher.matches(req))
    }
}

impl Handler for Router {
    fn serve_http(&self, w: &mut dyn ResponseWriter, req: Request) {
        match self.match_request(&req) {
            Some(route) => {
                tracing::debug!(route = %route.name, path = %req.path(), "Route matched");
                route.handler.serve_http(w, req);
            }
            None => {
                tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");
                not_found(w);
            }
        }
    }
}

fn not_found(w: &mut dyn ResponseWriter) {
    w.headers().set(CONTENT_TYPE, "text/plain; charset=utf-8");
    w.headers().set("X-Content-Type-Options", "nosniff");
    // 404 is in range
    let _ = w.write_header(404);
    w.write_body(b"404 page not found\n");
}
