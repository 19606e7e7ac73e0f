//! Outbound payload returned to the load balancer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response sent back to the load balancer.
///
/// Exactly one of `headers` / `multi_value_headers` is populated, chosen by
/// [`ResponseOptions::multi_value_headers`](crate::config::ResponseOptions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbResponse {
    pub status_code: u16,

    pub status_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<BTreeMap<String, Vec<String>>>,

    pub body: String,

    pub is_base64_encoded: bool,
}

impl AlbResponse {
    /// Single value lookup across whichever header form is populated.
    pub fn header(&self, name: &str) -> Option<&str> {
        if let Some(headers) = &self.headers {
            return headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str());
        }
        self.multi_value_headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.first())
                .map(String::as_str)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header_forms_are_omitted() {
        let resp = AlbResponse {
            status_code: 200,
            status_description: "OK".into(),
            headers: None,
            multi_value_headers: None,
            body: "ok".into(),
            is_base64_encoded: false,
        };

        let doc = serde_json::to_value(&resp).unwrap();
        let obj = doc.as_object().unwrap();
        assert!(!obj.contains_key("headers"));
        assert!(!obj.contains_key("multiValueHeaders"));
        assert_eq!(obj["statusCode"], 200);
        assert_eq!(obj["statusDescription"], "OK");
        assert_eq!(obj["isBase64Encoded"], false);
    }

    #[test]
    fn test_header_lookup() {
        let mut multi = BTreeMap::new();
        multi.insert("Set-Cookie".to_string(), vec!["a=1".to_string(), "b=2".to_string()]);
        let resp = AlbResponse {
            multi_value_headers: Some(multi),
            ..Default::default()
        };

        assert_eq!(resp.header("set-cookie"), Some("a=1"));
        assert_eq!(resp.header("Content-Type"), None);
    }
}
