//! `tower::Service` integration for function runtimes.

use std::future::{ready, Ready};
use std::task::{Context as TaskContext, Poll};

use serde_json::Value;
use tower::Service;

use crate::context::Context;
use crate::error::AdapterError;
use crate::handler::{Adapter, Handler};

/// One event delivered by the function runtime.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub context: Context,
    pub payload: Value,
}

impl Invocation {
    pub fn new(context: Context, payload: Value) -> Self {
        Self { context, payload }
    }
}

impl<H: Handler> Service<Invocation> for Adapter<H> {
    type Response = Value;
    type Error = AdapterError;
    type Future = Ready<Result<Value, AdapterError>>;

    fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, invocation: Invocation) -> Self::Future {
        ready(self.invoke(invocation.context, invocation.payload))
    }
}
