//! HTTP client for the upstream Notion API.
//!
//! One [`ApiClient`] is built at startup from [`ApiConfig`] and shared by all
//! tool invocations. It owns the base URL, the default headers and the
//! timeout, and resolves the credential of every outgoing request.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::adapter::PreparedRequest;
use super::error::ToolError;
use crate::core::config::ApiConfig;
use crate::core::{Error, Result};

const NOTION_VERSION_HEADER: &str = "notion-version";

/// Extract the token from an inbound `Authorization` header value.
///
/// A `Bearer ` prefix is stripped when present; blank values yield `None`.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim_start();
    let token = match header.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest,
        None if header.trim_end().eq_ignore_ascii_case("bearer") => "",
        _ => header,
    }
    .trim();
    (!token.is_empty()).then_some(token)
}

fn bearer_value(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

/// Shared client for the upstream API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    default_authorization: HeaderValue,
}

impl ApiClient {
    /// Build the client from configuration.
    ///
    /// Fails when the base URL or a header value is malformed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(NOTION_VERSION_HEADER),
            HeaderValue::from_str(&config.notion_version)
                .map_err(|e| Error::config(format!("invalid Notion version: {e}")))?,
        );

        let mut default_authorization = HeaderValue::from_str(&bearer_value(&config.token))
            .map_err(|_| Error::config("API token contains invalid header characters"))?;
        default_authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        info!(
            "API client ready for {} (timeout {}s)",
            base_url, config.timeout_secs
        );

        Ok(Self {
            http,
            base_url,
            default_authorization,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the `Authorization` header for one request.
    ///
    /// A caller credential overrides the configured token for this request
    /// only.
    pub fn authorization(&self, credential: Option<&str>) -> std::result::Result<HeaderValue, ToolError> {
        match credential {
            Some(token) => {
                let mut value = HeaderValue::from_str(&bearer_value(token)).map_err(|_| {
                    ToolError::invalid_arguments("authorization credential contains invalid characters")
                })?;
                value.set_sensitive(true);
                Ok(value)
            }
            None => Ok(self.default_authorization.clone()),
        }
    }

    /// Full URL of a prepared request.
    pub fn url_for(&self, request: &PreparedRequest) -> std::result::Result<Url, ToolError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::invalid_arguments("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    /// Issue one request and return the decoded response body.
    ///
    /// Exactly one attempt is made. Any non-2xx status becomes
    /// [`ToolError::Api`], carrying the body's `message` when there is one.
    pub async fn send(
        &self,
        request: &PreparedRequest,
        credential: Option<&str>,
    ) -> std::result::Result<Value, ToolError> {
        let url = self.url_for(request)?;
        debug!("{} {} query={}", request.method, url, request.query_string());

        let mut builder = self
            .http
            .request(request.method.as_reqwest(), url)
            .header(AUTHORIZATION, self.authorization(credential)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())));
        }

        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_owned))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        warn!("{} {} returned {}", request.method, request.path(), status);
        Err(ToolError::api(status.as_u16(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::with_token("secret_default")).unwrap()
    }

    #[test]
    fn test_bearer_token_strips_prefix() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("BEARER\tabc "), Some("abc"));
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_default_authorization() {
        let value = client().authorization(None).unwrap();
        assert_eq!(value, "Bearer secret_default");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_prefixed_token_not_doubled() {
        let client = ApiClient::new(&ApiConfig::with_token("Bearer secret_x")).unwrap();
        assert_eq!(client.authorization(None).unwrap(), "Bearer secret_x");
    }

    #[test]
    fn test_caller_credential_overrides_default() {
        let client = client();
        assert_eq!(client.authorization(Some("caller")).unwrap(), "Bearer caller");
        assert_eq!(client.authorization(None).unwrap(), "Bearer secret_default");
    }

    #[test]
    fn test_invalid_credential_rejected() {
        let err = client().authorization(Some("bad\ntoken")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig::with_token("t").base_url("not a url");
        assert!(matches!(ApiClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let client = client();
        let request = PreparedRequest {
            method: super::super::descriptor::HttpMethod::Get,
            segments: vec!["v1".into(), "pages".into(), "a/b c".into()],
            query: vec![],
            body: None,
        };
        let url = client.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "https://api.notion.com/v1/pages/a%2Fb%20c");
    }

    #[test]
    fn test_url_for_keeps_base_path_prefix() {
        let config = ApiConfig::with_token("t").base_url("http://localhost:9000/proxy/");
        let client = ApiClient::new(&config).unwrap();
        let request = PreparedRequest {
            method: super::super::descriptor::HttpMethod::Get,
            segments: vec!["v1".into(), "users".into()],
            query: vec![],
            body: None,
        };
        let url = client.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/proxy/v1/users");
    }
}
