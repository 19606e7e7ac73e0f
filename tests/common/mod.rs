//! Shared helpers for adapter integration tests.

use std::sync::{Arc, Mutex};

use alb_lambda::{
    handler_fn, wrap, AdapterResult, AlbRequest, AlbResponse, Context, Handler, Request,
    ResponseOptions, ResponseWriter,
};
use serde_json::Value;

/// Serialize an event the way the runtime hands it over.
#[allow(dead_code)]
pub fn event(req: &AlbRequest) -> Value {
    serde_json::to_value(req).expect("serialize event")
}

/// Invoke `handler` with `req` and decode the response document.
#[allow(dead_code)]
pub fn invoke<H: Handler>(handler: H, options: ResponseOptions, req: &AlbRequest) -> AdapterResult<AlbResponse> {
    let adapter = wrap(handler, options);
    adapter
        .invoke(Context::background(), event(req))
        .map(|doc| serde_json::from_value(doc).expect("decode response"))
}

/// Invoke a response-producing handler with an empty request.
#[allow(dead_code)]
pub fn respond<F>(options: ResponseOptions, f: F) -> AlbResponse
where
    F: Fn(&mut dyn ResponseWriter) + Send + Sync,
{
    invoke(handler_fn(move |w, _| f(w)), options, &AlbRequest::default()).expect("invoke")
}

/// Run `req` through a handler that records what `observe` extracts from
/// the request, and return the observation.
#[allow(dead_code)]
pub fn observe<T, F>(req: &AlbRequest, observe: F) -> T
where
    T: Send + 'static,
    F: Fn(Request) -> T + Send + Sync,
{
    let seen: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
    let slot = seen.clone();
    invoke(
        handler_fn(move |_, req| {
            *slot.lock().unwrap() = Some(observe(req));
        }),
        ResponseOptions::default(),
        req,
    )
    .expect("invoke");

    let value = seen.lock().unwrap().take();
    value.expect("handler was not called")
}
