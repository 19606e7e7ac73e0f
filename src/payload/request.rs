//! Inbound payload delivered by the load balancer.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::http::Headers;

/// An HTTP request as forwarded by an application load balancer.
///
/// The load balancer fills exactly one of the single/multi value forms of
/// the query string and of the headers, depending on whether multi value
/// mode is enabled on the target group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub request_context: RequestContext,

    #[serde(deserialize_with = "null_as_default")]
    pub http_method: String,

    /// Already URL-decoded by the load balancer.
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub query_string_parameters: HashMap<String, String>,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub multi_value_query_string_parameters: HashMap<String, Vec<String>>,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub headers: HashMap<String, String>,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub multi_value_headers: HashMap<String, Vec<String>>,

    /// Limited to 1 MiB by the load balancer.
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,
}

/// Information pertinent to the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestContext {
    #[serde(deserialize_with = "null_as_default")]
    pub elb: Elb,
}

/// The load balancer that received the request.
///
/// Handlers read it from the request context under
/// [`ELB_CONTEXT_KEY`](crate::http::ELB_CONTEXT_KEY).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Elb {
    #[serde(deserialize_with = "null_as_default")]
    pub target_group_arn: String,
}

/// Query parameters in whichever form the load balancer delivered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource<'a> {
    Single(&'a HashMap<String, String>),
    Multi(&'a HashMap<String, Vec<String>>),
}

impl QuerySource<'_> {
    /// Assemble the raw query string.
    ///
    /// Keys and values arrive percent-encoded as they were on the wire, so
    /// they are joined verbatim. Encoding them again would double-escape.
    /// Pair order follows map iteration and is not stable.
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = match self {
            QuerySource::Single(params) => {
                params.iter().map(|(k, v)| format!("{k}={v}")).collect()
            }
            QuerySource::Multi(params) => params
                .iter()
                .flat_map(|(k, values)| values.iter().map(move |v| format!("{k}={v}")))
                .collect(),
        };
        pairs.join("&")
    }
}

/// Request headers in whichever form the load balancer delivered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSource<'a> {
    Single(&'a HashMap<String, String>),
    Multi(&'a HashMap<String, Vec<String>>),
}

impl HeaderSource<'_> {
    /// Normalize to a header multi-map.
    ///
    /// Single values are stored under their canonical key; multi values
    /// keep the keys exactly as delivered.
    pub fn to_headers(&self) -> Headers {
        let mut headers = Headers::new();
        match self {
            HeaderSource::Single(map) => {
                for (k, v) in map.iter() {
                    headers.set(k, v.clone());
                }
            }
            HeaderSource::Multi(map) => {
                for (k, values) in map.iter() {
                    headers.insert_values(k.clone(), values.clone());
                }
            }
        }
        headers
    }
}

impl AlbRequest {
    /// The multi value form wins whenever it is non-empty.
    pub fn query_source(&self) -> QuerySource<'_> {
        if !self.multi_value_query_string_parameters.is_empty() {
            QuerySource::Multi(&self.multi_value_query_string_parameters)
        } else {
            QuerySource::Single(&self.query_string_parameters)
        }
    }

    /// The multi value form wins whenever it is non-empty.
    pub fn header_source(&self) -> HeaderSource<'_> {
        if !self.multi_value_headers.is_empty() {
            HeaderSource::Multi(&self.multi_value_headers)
        } else {
            HeaderSource::Single(&self.headers)
        }
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
