use tracing::{debug, info, warn};
use url::Url;

use crate::{Error, Result, transport::Transport};

/// Name of the cookie the service keeps the session token in.
pub const SESSION_COOKIE: &str = "sessionid";

/// Owns the transport and with it the session token.
///
/// Goes from unauthenticated to authenticated when the server sets the
/// session cookie (or a token is supplied), and is closed for good by
/// [`Session::close`].
pub struct Session<T> {
    transport: Option<T>,
    api_base: Url,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, api_base: Url) -> Self {
        Self {
            transport: Some(transport),
            api_base,
        }
    }

    /// The open transport, or [`Error::LoggedOut`] once closed.
    pub fn transport(&self) -> Result<&T> {
        self.transport.as_ref().ok_or(Error::LoggedOut)
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.transport
            .as_ref()?
            .cookie(&self.api_base, SESSION_COOKIE)
            .filter(|token| !token.is_empty())
    }

    /// Switches to `token`, returning whether anything changed.
    pub fn set_token(&mut self, token: &str) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            warn!("Ignoring session token on a closed session");
            return false;
        };

        if transport.cookie(&self.api_base, SESSION_COOKIE).as_deref() == Some(token) {
            debug!("Session token unchanged");
            return false;
        }

        transport.set_cookie(&self.api_base, SESSION_COOKIE, token);
        debug!("Session token replaced");
        true
    }

    /// Drops the transport and every cookie it held.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            info!("Session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use serde_json::Value;

    use super::*;
    use crate::transport::Reply;

    #[derive(Default)]
    struct CookieOnly {
        cookies: RefCell<HashMap<String, String>>,
    }

    impl Transport for CookieOnly {
        fn post_json(&self, _url: &Url, _body: &Value) -> Result<Reply> {
            Ok(Reply::ok(r#"{"status":"success","content":{}}"#))
        }

        fn cookie(&self, _url: &Url, name: &str) -> Option<String> {
            self.cookies.borrow().get(name).cloned()
        }

        fn set_cookie(&self, _url: &Url, name: &str, value: &str) {
            self.cookies
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
    }

    fn session() -> Session<CookieOnly> {
        let base = Url::parse("http://game06.wordfeud.com/wf/").unwrap();
        Session::new(CookieOnly::default(), base)
    }

    #[test]
    fn starts_unauthenticated() {
        let session = session();
        assert!(session.is_open());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn set_token_reports_change_once() {
        let mut session = session();
        assert!(session.set_token("abc"));
        assert!(!session.set_token("abc"));
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert!(session.set_token("def"));
        assert_eq!(session.token().as_deref(), Some("def"));
    }

    #[test]
    fn close_discards_token_and_transport() {
        let mut session = session();
        session.set_token("abc");
        session.close();

        assert!(!session.is_open());
        assert_eq!(session.token(), None);
        assert!(matches!(session.transport(), Err(Error::LoggedOut)));
        assert!(!session.set_token("xyz"));
    }
}
