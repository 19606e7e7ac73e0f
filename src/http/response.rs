//! Response capture and outbound translation.
//!
//! # Responsibilities
//! - Give handlers the usual response-writer surface (headers, status, body)
//! - Snapshot headers when the status is written
//! - Turn the captured state into the load balancer response payload
//!
//! # Design Decisions
//! - Header mutations after the status is written are accepted but ignored,
//!   matching what an HTTP server does once headers hit the wire
//! - An invalid status is remembered, so `finalize` fails even when the
//!   handler drops the error returned by `write_header`
//! - Base64 is used unless the content type is text-like; this is the same
//!   test the load balancer applies to request bodies

use std::io;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::BytesMut;
use http::StatusCode;

use crate::config::ResponseOptions;
use crate::error::{AdapterError, AdapterResult};
use crate::http::header::CONTENT_TYPE;
use crate::http::sniff::{detect_content_type, SNIFF_LEN};
use crate::http::Headers;
use crate::payload::AlbResponse;
use crate::security::limits;

/// Lowest and highest status codes a handler may write.
pub const MIN_STATUS: u16 = 199;
pub const MAX_STATUS: u16 = 599;

/// Content types that are sent without base64 encoding, besides `text/*`.
const TEXT_LIKE: &[&str] = &["application/json", "application/javascript", "application/xml"];

/// Surface through which handlers produce a response.
pub trait ResponseWriter {
    /// Header map that will be sent with the status.
    ///
    /// Changes made after `write_header` (or the first `write_body`) have no
    /// effect on the response.
    fn headers(&mut self) -> &mut Headers;

    /// Write the status code. Only the first call counts.
    fn write_header(&mut self, status: u16) -> AdapterResult<()>;

    /// Append body bytes, writing status 200 first if no status was written.
    fn write_body(&mut self, data: &[u8]) -> usize;
}

/// Captures everything a handler writes during one invocation.
#[derive(Debug)]
pub struct ResponseCapture {
    options: ResponseOptions,
    /// Map handed out to the handler; may be mutated after the status.
    handler_headers: Headers,
    handler_headers_touched: bool,
    /// Copy of `handler_headers` taken at status time.
    headers: Headers,
    status: Option<u16>,
    invalid_status: Option<u16>,
    body: BytesMut,
}

impl ResponseCapture {
    pub fn new(options: ResponseOptions) -> Self {
        Self {
            options,
            handler_headers: Headers::new(),
            handler_headers_touched: false,
            headers: Headers::new(),
            status: None,
            invalid_status: None,
            body: BytesMut::new(),
        }
    }

    /// Status written so far, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Produce the outbound payload. Consumes the capture.
    pub fn finalize(mut self) -> AdapterResult<AlbResponse> {
        if let Some(code) = self.invalid_status {
            return Err(AdapterError::InvalidStatus(code));
        }
        if self.status.is_none() {
            self.write_header(StatusCode::OK.as_u16())?;
        }
        let status = self.status.unwrap_or(StatusCode::OK.as_u16());

        let mut headers = std::mem::take(&mut self.headers);
        let has_content_type = headers.get(CONTENT_TYPE).is_some_and(|v| !v.is_empty());
        if !self.body.is_empty() && !has_content_type {
            let sniff_len = self.body.len().min(SNIFF_LEN);
            headers.set(CONTENT_TYPE, detect_content_type(&self.body[..sniff_len]));
        }
        let content_type = headers.get(CONTENT_TYPE).unwrap_or_default().to_string();

        let (single, multi) = if self.options.multi_value_headers {
            (None, Some(headers.into_inner()))
        } else {
            (Some(headers.to_single_values()), None)
        };

        if limits::exceeds_body_limit(self.body.len()) {
            tracing::warn!(
                body_len = self.body.len(),
                limit = limits::MAX_BODY_BYTES,
                "Response body exceeds load balancer limit"
            );
        }

        let is_base64_encoded = !is_text_like(&content_type);
        let body = if is_base64_encoded {
            STANDARD.encode(&self.body)
        } else {
            String::from_utf8_lossy(&self.body).into_owned()
        };

        Ok(AlbResponse {
            status_code: status,
            status_description: status_text(status).to_string(),
            headers: single,
            multi_value_headers: multi,
            body,
            is_base64_encoded,
        })
    }
}

impl ResponseWriter for ResponseCapture {
    fn headers(&mut self) -> &mut Headers {
        self.handler_headers_touched = true;
        &mut self.handler_headers
    }

    fn write_header(&mut self, status: u16) -> AdapterResult<()> {
        if self.status.is_some() || self.invalid_status.is_some() {
            tracing::warn!(status, "multiple write_header calls");
            return Ok(());
        }
        if !(MIN_STATUS..=MAX_STATUS).contains(&status) {
            self.invalid_status = Some(status);
            return Err(AdapterError::InvalidStatus(status));
        }
        if self.handler_headers_touched {
            self.headers = self.handler_headers.clone();
        }
        self.status = Some(status);
        Ok(())
    }

    fn write_body(&mut self, data: &[u8]) -> usize {
        if self.status.is_none() && self.invalid_status.is_none() {
            // 200 is always in range
            let _ = self.write_header(StatusCode::OK.as_u16());
        }
        self.body.extend_from_slice(data);
        data.len()
    }
}

impl io::Write for ResponseCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_body(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `text/*` or one of the exact text-like application types.
pub fn is_text_like(content_type: &str) -> bool {
    content_type.starts_with("text/") || TEXT_LIKE.contains(&content_type)
}

/// Canonical reason phrase, empty when the code has none.
pub fn status_text(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}
