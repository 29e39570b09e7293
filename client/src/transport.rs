use std::sync::Arc;

use reqwest::{
    StatusCode,
    blocking::Client,
    cookie::{CookieStore, Jar},
    header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, SET_COOKIE},
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::Result;

/// Raw HTTP reply, before any envelope handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            body: body.into(),
        }
    }
}

/// One persistent, cookie-carrying HTTP connection context.
///
/// Implementations send fixed headers and whatever cookies they hold with
/// every request, and store cookies set by responses.
pub trait Transport {
    /// A single POST with a JSON body. Never retried.
    fn post_json(&self, url: &Url, body: &Value) -> Result<Reply>;

    /// The value of cookie `name` that would be sent to `url`.
    fn cookie(&self, url: &Url, name: &str) -> Option<String>;

    fn set_cookie(&self, url: &Url, name: &str, value: &str);
}

/// [`Transport`] over a blocking reqwest client with an in-memory cookie jar.
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self { client, jar })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<Reply> {
        debug!("POST {}", url);

        let response = self.client.post(url.clone()).json(body).send()?;
        let status = response.status();
        debug!("Response status: {}", status);
        debug!("Response headers: {}", describe_headers(response.headers()));

        let body = match response.text() {
            Ok(body) => body,
            // The body of a failed request is never inspected.
            Err(e) if status != StatusCode::OK => {
                debug!("Ignoring unreadable body of failed request: {}", e);
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Reply {
            status: status.as_u16(),
            body,
        })
    }

    fn cookie(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar.cookies(url)?;
        find_cookie(header.to_str().ok()?, name)
    }

    fn set_cookie(&self, url: &Url, name: &str, value: &str) {
        self.jar.add_cookie_str(&format!("{name}={value}; Path=/"), url);
    }
}

/// Renders headers for logging with cookie values masked.
pub fn describe_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if name == COOKIE || name == SET_COOKIE {
                format!("{}: <redacted>", name)
            } else {
                format!("{}: {}", name, value.to_str().unwrap_or("<binary>"))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Looks up `name` in a `Cookie` header value (`a=1; b=2`).
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
