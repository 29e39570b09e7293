//! Wordfeud Client Library
//!
//! A blocking Rust client for the Wordfeud game API: accounts, friends,
//! invites, moves and chat.
//!
//! Every call is one POST to the service. The reply is a `{status, content}`
//! envelope; a `"success"` status yields the relevant part of `content`, and
//! anything else becomes an [`Error`] carrying the server's reason string.
//! Payloads are passed through as [`serde_json::Value`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wordfeud_client::{BoardType, ClientConfig, Ruleset, WordfeudClient};
//!
//! fn main() -> wordfeud_client::Result<()> {
//!     let client = WordfeudClient::new(ClientConfig::default())?;
//!     client.login_email("me@example.com", "secret")?;
//!
//!     // Keep the token to resume the session later
//!     let token = client.session_token();
//!     println!("Session: {:?}", token);
//!
//!     let games = client.games()?;
//!     println!("Games: {}", games);
//!
//!     client.invite("someone", Ruleset::English, BoardType::Random)?;
//!     Ok(())
//! }
//! ```
//!
//! Rejections are errors, except when resigning:
//!
//! ```rust,no_run
//! use wordfeud_client::{ClientConfig, Resignation, WordfeudClient};
//!
//! # fn main() -> wordfeud_client::Result<()> {
//! let client = WordfeudClient::new(ClientConfig::default().with_session_token("abc"))?;
//! match client.resign(1234)? {
//!     Resignation::Resigned => println!("Resigned"),
//!     Resignation::Refused(reason) => println!("Could not resign: {}", reason),
//! }
//!
//! if let Err(e) = client.accept_invite(99) {
//!     println!("Rejected: {:?}", e.discriminator());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod digest;
mod error;
pub mod session;
pub mod transport;

pub use client::{Resignation, WordfeudClient};
pub use config::ClientConfig;
pub use digest::password_digest;
pub use error::{Error, Result};
pub use transport::{HttpTransport, Reply, Transport};

// Re-export common types for convenience
pub use wordfeud_common::{models::*, protocol::*};
