use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};
use wordfeud_common::{
    models::{BoardType, IntoId, PlacedTile, Ruleset},
    protocol::{Endpoint, Envelope, EnvelopeError, Rejection},
    requests,
};

use crate::{
    ClientConfig, Error, Result,
    digest::password_digest,
    session::Session,
    transport::{HttpTransport, Transport},
};

/// Outcome of [`WordfeudClient::resign`].
///
/// Resigning reports a refusal as a value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resignation {
    Resigned,
    Refused(Rejection),
}

impl Resignation {
    pub fn is_resigned(&self) -> bool {
        matches!(self, Resignation::Resigned)
    }

    /// Why the server refused, e.g. `"not_your_turn"` or `"game_over"`.
    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Resignation::Resigned => None,
            Resignation::Refused(rejection) => Some(rejection.as_str()),
        }
    }
}

/// Blocking client for the Wordfeud API.
///
/// Every operation is a single POST; nothing is retried. One instance holds
/// one session, so share it across threads only behind a lock.
pub struct WordfeudClient<T = HttpTransport> {
    config: ClientConfig,
    session: Session<T>,
}

impl WordfeudClient {
    /// Create a client over HTTP, resuming `config.session_token` if set.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> WordfeudClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let mut session = Session::new(transport, config.api_base.clone());
        if let Some(token) = config.session_token.as_deref() {
            session.set_token(token);
        }
        Self { config, session }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the session token of the authenticated user, if any.
    pub fn session_token(&self) -> Option<String> {
        self.session.token()
    }

    /// Switch to another user's session.
    /// Returns true if the held token changed.
    pub fn set_session_token(&mut self, token: &str) -> bool {
        self.session.set_token(token)
    }

    /// Release the connection and forget the session.
    /// Every later network call fails with [`Error::LoggedOut`].
    pub fn logout(&mut self) {
        info!("Logging out");
        self.session.close();
    }

    pub fn is_logged_out(&self) -> bool {
        !self.session.is_open()
    }

    /// Log in with an email address and plaintext password.
    pub fn login_email(&self, email: &str, password: &str) -> Result<Value> {
        let body = requests::LoginEmail {
            email,
            password: password_digest(password),
        };
        let envelope = self.call(Endpoint::LoginEmail, to_body(&body)?)?;
        info!("Logged in by email");
        Ok(envelope.content)
    }

    /// Log in with a user ID and plaintext password.
    pub fn login_id(&self, user_id: impl IntoId, password: &str) -> Result<Value> {
        let id = user_id.into_id()?;
        let body = requests::LoginId {
            id,
            password: password_digest(password),
        };
        let envelope = self.call(Endpoint::LoginId, to_body(&body)?)?;
        info!("Logged in as user {}", id);
        Ok(envelope.content)
    }

    /// Create an account, returning the new user ID.
    pub fn create_account(&self, username: &str, email: &str, password: &str) -> Result<i64> {
        let body = requests::CreateUser {
            username,
            email,
            password: password_digest(password),
        };
        let mut envelope = self.call(Endpoint::CreateUser, to_body(&body)?)?;
        let id = envelope
            .take_field("id")?
            .as_i64()
            .ok_or(EnvelopeError::WrongType {
                field: "id",
                expected: "an integer",
            })?;
        info!("Created account {}", id);
        Ok(id)
    }

    pub fn change_password(&self, password: &str) -> Result<()> {
        let body = requests::SetPassword {
            password: password_digest(password),
        };
        self.call(Endpoint::SetPassword, to_body(&body)?)?;
        Ok(())
    }

    /// Search for users by username or email address.
    pub fn search_user(&self, query: &str) -> Result<Value> {
        let body = requests::SearchUser {
            username_or_email: query,
        };
        let mut envelope = self.call(Endpoint::SearchUser, to_body(&body)?)?;
        Ok(envelope.take_field("result")?)
    }

    /// List of friends (relationships).
    pub fn friends(&self) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Relationships, empty_body())?;
        Ok(envelope.take_field("relationships")?)
    }

    /// Add a user to the friend list. `kind` is the relationship type, 0 for
    /// an ordinary friend.
    pub fn add_friend(&self, user_id: impl IntoId, kind: impl IntoId) -> Result<Value> {
        let body = requests::CreateRelationship {
            id: user_id.into_id()?,
            kind: kind.into_id()?,
        };
        Ok(self.call(Endpoint::CreateRelationship, to_body(&body)?)?.content)
    }

    pub fn delete_friend(&self, user_id: impl IntoId) -> Result<()> {
        let endpoint = Endpoint::DeleteRelationship(user_id.into_id()?);
        self.call(endpoint, empty_body())?;
        Ok(())
    }

    /// Ask to be matched with a random opponent.
    pub fn invite_random_opponent(
        &self,
        ruleset: Ruleset,
        board_type: BoardType,
    ) -> Result<Value> {
        let body = requests::RandomRequest {
            ruleset,
            board_type,
        };
        Ok(self.call(Endpoint::RandomRequest, to_body(&body)?)?.content)
    }

    pub fn upload_avatar(&self, image_data: &str) -> Result<()> {
        let body = requests::UploadAvatar { image_data };
        self.call(Endpoint::UploadAvatar, to_body(&body)?)?;
        Ok(())
    }

    /// URL of a user's avatar image. Sizes known to work are 40 and 60.
    pub fn avatar_url(&self, user_id: impl IntoId, size: impl IntoId) -> Result<String> {
        let user_id = user_id.into_id()?;
        let size = size.into_id()?;
        Ok(format!("{}{}/{}", self.config.avatar_base, size, user_id))
    }

    /// Notifications for the current user.
    pub fn notifications(&self) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Notifications, empty_body())?;
        Ok(envelope.take_field("entries")?)
    }

    /// Pending invites, running games and the like.
    pub fn status(&self) -> Result<Value> {
        Ok(self.call(Endpoint::Status, empty_body())?.content)
    }

    pub fn games(&self) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Games, empty_body())?;
        Ok(envelope.take_field("games")?)
    }

    pub fn game(&self, game_id: impl IntoId) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Game(game_id.into_id()?), empty_body())?;
        Ok(envelope.take_field("game")?)
    }

    /// Layout of a board: which squares are double/triple letter/word.
    pub fn board(&self, board_id: impl IntoId) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Board(board_id.into_id()?), empty_body())?;
        Ok(envelope.take_field("board")?)
    }

    pub fn chat_messages(&self, game_id: impl IntoId) -> Result<Value> {
        let mut envelope = self.call(Endpoint::Chat(game_id.into_id()?), empty_body())?;
        Ok(envelope.take_field("messages")?)
    }

    /// Send a chat message; surrounding whitespace is stripped.
    pub fn send_chat_message(&self, game_id: impl IntoId, message: &str) -> Result<Value> {
        let endpoint = Endpoint::SendChat(game_id.into_id()?);
        let body = requests::ChatMessage {
            message: message.trim(),
        };
        Ok(self.call(endpoint, to_body(&body)?)?.content)
    }

    /// Lay tiles forming `word`. Rejections include `illegal_word` and
    /// `illegal_tiles`.
    pub fn place(
        &self,
        game_id: impl IntoId,
        ruleset: Ruleset,
        tiles: &[PlacedTile],
        word: &str,
    ) -> Result<Value> {
        let endpoint = Endpoint::Move(game_id.into_id()?);
        let body = requests::Move {
            tiles,
            ruleset,
            words: [word],
        };
        Ok(self.call(endpoint, to_body(&body)?)?.content)
    }

    /// Pass the turn.
    pub fn skip_turn(&self, game_id: impl IntoId) -> Result<Value> {
        Ok(self.call(Endpoint::Pass(game_id.into_id()?), empty_body())?.content)
    }

    /// Resign a game. A refusal (`not_your_turn`, `game_over`) comes back as
    /// [`Resignation::Refused`], not as an error.
    pub fn resign(&self, game_id: impl IntoId) -> Result<Resignation> {
        let envelope = self.execute(Endpoint::Resign(game_id.into_id()?), empty_body())?;
        if envelope.is_success() {
            Ok(Resignation::Resigned)
        } else {
            let rejection = envelope.rejection();
            debug!("Resignation refused: {}", rejection);
            Ok(Resignation::Refused(rejection))
        }
    }

    /// Invite a user to a game.
    pub fn invite(
        &self,
        username: &str,
        ruleset: Ruleset,
        board_type: BoardType,
    ) -> Result<Value> {
        let body = requests::Invite {
            invitee: username,
            ruleset,
            board_type,
        };
        Ok(self.call(Endpoint::NewInvite, to_body(&body)?)?.content)
    }

    pub fn accept_invite(&self, invite_id: impl IntoId) -> Result<()> {
        self.call(Endpoint::AcceptInvite(invite_id.into_id()?), empty_body())?;
        Ok(())
    }

    pub fn reject_invite(&self, invite_id: impl IntoId) -> Result<()> {
        self.call(Endpoint::RejectInvite(invite_id.into_id()?), empty_body())?;
        Ok(())
    }

    /// [`execute`](Self::execute), turning a rejection into an error.
    fn call(&self, endpoint: Endpoint, payload: Value) -> Result<Envelope> {
        let envelope = self.execute(endpoint, payload)?;
        if envelope.is_success() {
            return Ok(envelope);
        }

        let rejection = envelope.rejection();
        warn!("{} rejected: {}", endpoint, rejection);
        if endpoint.is_login() {
            Err(Error::LogIn(rejection))
        } else {
            Err(Error::Rejected(rejection))
        }
    }

    /// Send one request and decode the envelope, whatever its status.
    #[instrument(level = "trace", skip_all, fields(endpoint = %endpoint))]
    fn execute(&self, endpoint: Endpoint, payload: Value) -> Result<Envelope> {
        let transport = self.session.transport()?;
        let url = self.config.api_base.join(&format!("{endpoint}/"))?;

        let reply = transport.post_json(&url, &payload)?;
        if reply.status != 200 {
            warn!("{} failed with HTTP status {}", endpoint, reply.status);
            return Err(Error::Http(reply.status));
        }
        debug!("Response body: {}", reply.body);

        let envelope = Envelope::from_body(&reply.body)?;
        debug!(
            "Decoded envelope: status={}, session held: {}",
            envelope.status,
            self.session.token().is_some()
        );
        Ok(envelope)
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(Error::Encode)
}

fn empty_body() -> Value {
    Value::Object(Map::new())
}
