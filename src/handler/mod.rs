//! Handler dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! runtime (tower::Service call or direct invoke)
//!     → adapter.rs (decode, build Request, fresh ResponseCapture)
//!     → Handler::serve_http (abort trapped)
//!     → ResponseCapture::finalize → encode
//!     → runtime
//! ```
//!
//! # Design Decisions
//! - Handlers are synchronous: the whole body is in memory on entry and exit
//! - A handler panic never escapes `invoke`; it becomes `HandlerAbort`

pub mod adapter;
pub mod service;

use std::sync::Arc;

use crate::http::{Request, ResponseWriter};

pub use adapter::{wrap, Adapter};
pub use service::Invocation;

/// Application code that answers HTTP requests.
pub trait Handler: Send + Sync {
    fn serve_http(&self, w: &mut dyn ResponseWriter, req: Request);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve_http(&self, w: &mut dyn ResponseWriter, req: Request) {
        (**self).serve_http(w, req)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve_http(&self, w: &mut dyn ResponseWriter, req: Request) {
        (**self).serve_http(w, req)
    }
}

/// Handler backed by a closure, see [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Turn a closure into a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, Request) + Send + Sync,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, Request) + Send + Sync,
{
    fn serve_http(&self, w: &mut dyn ResponseWriter, req: Request) {
        (self.f)(w, req)
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}
