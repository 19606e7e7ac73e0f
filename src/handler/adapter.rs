//! Invocation driver.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::config::ResponseOptions;
use crate::context::Context;
use crate::error::{AdapterError, AdapterResult};
use crate::handler::Handler;
use crate::http::{to_http_request, ResponseCapture};
use crate::payload::{decode_inbound, encode_outbound, AlbRequest, AlbResponse};

const UNKNOWN_PANIC: &str = "panic: unknown cause";

/// Wrap `handler` so it can answer load balancer invocations.
pub fn wrap<H: Handler>(handler: H, options: ResponseOptions) -> Adapter<H> {
    Adapter { handler, options }
}

/// A handler plus the response options it was wrapped with.
///
/// Holds no per-invocation state, so one adapter can serve concurrent
/// invocations.
#[derive(Debug, Clone)]
pub struct Adapter<H> {
    handler: H,
    options: ResponseOptions,
}

impl<H: Handler> Adapter<H> {
    pub fn options(&self) -> ResponseOptions {
        self.options
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Serve one invocation document and return the response document.
    pub fn invoke(&self, ctx: Context, document: Value) -> AdapterResult<Value> {
        let payload = decode_inbound(document)?;
        let response = self.invoke_payload(ctx, payload)?;
        encode_outbound(&response)
    }

    /// Serve one already decoded payload.
    pub fn invoke_payload(&self, ctx: Context, payload: AlbRequest) -> AdapterResult<AlbResponse> {
        let request_id = ctx.request_id().unwrap_or("-").to_string();
        let req = to_http_request(payload, ctx)?;

        tracing::debug!(
            request_id = %request_id,
            method = %req.method(),
            url = %req.url(),
            "Dispatching request"
        );

        let mut capture = ResponseCapture::new(self.options);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.handler.serve_http(&mut capture, req);
        }));
        if let Err(cause) = outcome {
            let message = panic_message(cause);
            tracing::warn!(request_id = %request_id, error = %message, "Handler aborted");
            return Err(AdapterError::HandlerAbort(message));
        }

        let response = capture.finalize().inspect_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Invalid response");
        })?;

        tracing::debug!(
            request_id = %request_id,
            status = response.status_code,
            base64 = response.is_base64_encoded,
            body_len = response.body.len(),
            "Invocation complete"
        );
        Ok(response)
    }
}

/// Printable form of a panic payload.
fn panic_message(cause: Box<dyn Any + Send>) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        UNKNOWN_PANIC.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use crate::http::{Request, ResponseWriter};
    use serde_json::json;

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42u8)), UNKNOWN_PANIC);
    }

    #[test]
    fn test_invoke_roundtrip() {
        let adapter = wrap(
            handler_fn(|w: &mut dyn ResponseWriter, req: Request| {
                w.headers().set("X-Method", req.method());
                w.write_body(b"ok");
            }),
            ResponseOptions::default(),
        );

        let out = adapter
            .invoke(Context::background(), json!({ "httpMethod": "GET", "path": "/x" }))
            .unwrap();
        assert_eq!(out["statusCode"], 200);
        assert_eq!(out["body"], "ok");
        assert_eq!(out["headers"]["X-Method"], "GET");
        assert!(out.get("multiValueHeaders").is_none());
    }

    #[test]
    fn test_malformed_document() {
        let adapter = wrap(handler_fn(|_, _| {}), ResponseOptions::default());
        let err = adapter
            .invoke(Context::background(), json!({ "path": 7 }))
            .unwrap_err();
        assert!(matches!(err, AdapterError::MalformedPayload(_)));
    }
}
