use std::env;

use url::Url;

use crate::Result;

pub const DEFAULT_API_URL: &str = "http://game06.wordfeud.com/wf/";
pub const DEFAULT_AVATAR_URL: &str = "http://avatars.wordfeud.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("wordfeud-client/", env!("CARGO_PKG_VERSION"));

/// Where and as whom the client talks to the service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base of the API namespace; endpoint paths are joined onto it.
    pub api_base: Url,
    pub avatar_base: Url,
    pub user_agent: String,
    /// Session to resume instead of logging in.
    pub session_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: parse_base(DEFAULT_API_URL).expect("Invalid default API URL"),
            avatar_base: parse_base(DEFAULT_AVATAR_URL).expect("Invalid default avatar URL"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            session_token: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `WORDFEUD_API_URL`, `WORDFEUD_AVATAR_URL`,
    /// `WORDFEUD_USER_AGENT` and `WORDFEUD_SESSION_ID`.
    pub fn from_env() -> Result<Self> {
        let api_base = env::var("WORDFEUD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let avatar_base =
            env::var("WORDFEUD_AVATAR_URL").unwrap_or_else(|_| DEFAULT_AVATAR_URL.to_string());
        let user_agent =
            env::var("WORDFEUD_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let session_token = env::var("WORDFEUD_SESSION_ID")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            api_base: parse_base(&api_base)?,
            avatar_base: parse_base(&avatar_base)?,
            user_agent,
            session_token,
        })
    }

    pub fn with_api_base(mut self, api_base: &str) -> Result<Self> {
        self.api_base = parse_base(api_base)?;
        Ok(self)
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

/// Parses a base URL, making sure it ends in `/` so that joins append to it.
pub fn parse_base(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = if raw.ends_with('/') {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("{raw}/"))?
    };
    Ok(url)
}
