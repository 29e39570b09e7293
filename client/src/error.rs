use thiserror::Error;
use wordfeud_common::{
    models::InvalidId,
    protocol::{EnvelopeError, Rejection},
};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to the Wordfeud API.
///
/// None of these are retried by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with an HTTP status other than 200 OK.
    #[error("unexpected HTTP status {0}")]
    Http(u16),

    /// The body was not a usable `{status, content}` envelope.
    #[error("invalid response: {0}")]
    Decode(#[from] EnvelopeError),

    #[error("could not encode request: {0}")]
    Encode(serde_json::Error),

    /// A login call was rejected, or the credentials are no good.
    #[error("login failed: {0}")]
    LogIn(Rejection),

    /// The server refused the operation.
    #[error("request rejected: {0}")]
    Rejected(Rejection),

    /// Failure below HTTP: DNS, connect, TLS, body read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// The session was closed by [`logout`](crate::WordfeudClient::logout).
    #[error("client is logged out")]
    LoggedOut,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// The server's rejection reason, for login and operation errors.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::LogIn(rejection) | Error::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// The server's discriminator string, e.g. `"user_not_found"`.
    pub fn discriminator(&self) -> Option<&str> {
        self.rejection().map(Rejection::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_only_for_server_rejections() {
        let err = Error::Rejected(Rejection::UserNotFound);
        assert_eq!(err.discriminator(), Some("user_not_found"));
        assert_eq!(err.to_string(), "request rejected: user_not_found");

        let err = Error::LogIn(Rejection::from("wrong_password"));
        assert_eq!(err.discriminator(), Some("wrong_password"));

        assert_eq!(Error::Http(500).discriminator(), None);
        assert_eq!(Error::Http(500).to_string(), "unexpected HTTP status 500");
        assert_eq!(Error::LoggedOut.discriminator(), None);
    }
}
