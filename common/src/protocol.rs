use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Value of `status` on an accepted request.
pub const STATUS_SUCCESS: &str = "success";

/// Every remote operation, with the identifiers interpolated into its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    LoginEmail,
    LoginId,
    SearchUser,
    Relationships,
    CreateRelationship,
    DeleteRelationship(i64),
    RandomRequest,
    UploadAvatar,
    Chat(i64),
    SendChat(i64),
    CreateUser,
    Notifications,
    Status,
    Games,
    Game(i64),
    Board(i64),
    Move(i64),
    Pass(i64),
    Resign(i64),
    NewInvite,
    AcceptInvite(i64),
    RejectInvite(i64),
    SetPassword,
}

impl Endpoint {
    /// Path below the API namespace, without leading or trailing slash.
    pub fn path(&self) -> String {
        match self {
            Endpoint::LoginEmail => "user/login/email".to_string(),
            Endpoint::LoginId => "user/login/id".to_string(),
            Endpoint::SearchUser => "user/search".to_string(),
            Endpoint::Relationships => "user/relationships".to_string(),
            Endpoint::CreateRelationship => "relationship/create".to_string(),
            Endpoint::DeleteRelationship(id) => format!("relationship/{id}/delete"),
            Endpoint::RandomRequest => "random_request/create".to_string(),
            Endpoint::UploadAvatar => "user/avatar/upload".to_string(),
            Endpoint::Chat(game) => format!("game/{game}/chat"),
            Endpoint::SendChat(game) => format!("game/{game}/chat/send"),
            Endpoint::CreateUser => "user/create".to_string(),
            Endpoint::Notifications => "user/notifications".to_string(),
            Endpoint::Status => "user/status".to_string(),
            Endpoint::Games => "user/games".to_string(),
            Endpoint::Game(game) => format!("game/{game}"),
            Endpoint::Board(board) => format!("board/{board}"),
            Endpoint::Move(game) => format!("game/{game}/move"),
            Endpoint::Pass(game) => format!("game/{game}/pass"),
            Endpoint::Resign(game) => format!("game/{game}/resign"),
            Endpoint::NewInvite => "invite/new".to_string(),
            Endpoint::AcceptInvite(invite) => format!("invite/{invite}/accept"),
            Endpoint::RejectInvite(invite) => format!("invite/{invite}/reject"),
            Endpoint::SetPassword => "user/password/set".to_string(),
        }
    }

    /// Whether a rejection from this endpoint is an authentication failure.
    pub fn is_login(&self) -> bool {
        matches!(self, Endpoint::LoginEmail | Endpoint::LoginId)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Server-side reason for rejecting a request, taken from `content.type`.
///
/// The vocabulary is not documented; anything unrecognised is kept verbatim
/// in [`Rejection::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rejection {
    DuplicateInvite,
    InvalidRuleset,
    InvalidBoardType,
    UserNotFound,
    NotYourTurn,
    GameOver,
    AccessDenied,
    IllegalWord,
    IllegalTiles,
    WrongPassword,
    UnknownEmail,
    Other(String),
}

impl Rejection {
    pub fn as_str(&self) -> &str {
        match self {
            Rejection::DuplicateInvite => "duplicate_invite",
            Rejection::InvalidRuleset => "invalid_ruleset",
            Rejection::InvalidBoardType => "invalid_board_type",
            Rejection::UserNotFound => "user_not_found",
            Rejection::NotYourTurn => "not_your_turn",
            Rejection::GameOver => "game_over",
            Rejection::AccessDenied => "access_denied",
            Rejection::IllegalWord => "illegal_word",
            Rejection::IllegalTiles => "illegal_tiles",
            Rejection::WrongPassword => "wrong_password",
            Rejection::UnknownEmail => "unknown_email",
            Rejection::Other(other) => other,
        }
    }
}

impl From<&str> for Rejection {
    fn from(s: &str) -> Self {
        match s {
            "duplicate_invite" => Rejection::DuplicateInvite,
            "invalid_ruleset" => Rejection::InvalidRuleset,
            "invalid_board_type" => Rejection::InvalidBoardType,
            "user_not_found" => Rejection::UserNotFound,
            "not_your_turn" => Rejection::NotYourTurn,
            "game_over" => Rejection::GameOver,
            "access_denied" => Rejection::AccessDenied,
            "illegal_word" => Rejection::IllegalWord,
            "illegal_tiles" => Rejection::IllegalTiles,
            "wrong_password" => Rejection::WrongPassword,
            "unknown_email" => Rejection::UnknownEmail,
            other => Rejection::Other(other.to_string()),
        }
    }
}

impl PartialEq<str> for Rejection {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Rejection {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("could not decode JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response has no string `status` field")]
    MissingStatus,
    #[error("response content has no `{0}` field")]
    MissingField(&'static str),
    #[error("response content field `{field}` is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// The `{status, content}` wrapper around every API reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: String,
    pub content: Value,
}

impl Envelope {
    pub fn success(content: Value) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            content,
        }
    }

    pub fn from_body(body: &str) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(mut map) = value else {
            return Err(EnvelopeError::NotAnObject);
        };
        let status = match map.remove("status") {
            Some(Value::String(status)) => status,
            _ => return Err(EnvelopeError::MissingStatus),
        };
        let content = map.remove("content").unwrap_or(Value::Null);
        Ok(Self { status, content })
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// The rejection reason, falling back to the raw status when the content
    /// carries no `type`.
    pub fn rejection(&self) -> Rejection {
        match self.content.get("type").and_then(Value::as_str) {
            Some(kind) => Rejection::from(kind),
            None => Rejection::from(self.status.as_str()),
        }
    }

    /// Moves one field out of the content object.
    pub fn take_field(&mut self, field: &'static str) -> Result<Value, EnvelopeError> {
        self.content
            .as_object_mut()
            .and_then(|content| content.remove(field))
            .ok_or(EnvelopeError::MissingField(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn paths_interpolate_identifiers() {
        assert_eq!(Endpoint::LoginEmail.path(), "user/login/email");
        assert_eq!(Endpoint::DeleteRelationship(17).path(), "relationship/17/delete");
        assert_eq!(Endpoint::SendChat(3).path(), "game/3/chat/send");
        assert_eq!(Endpoint::Game(12).path(), "game/12");
        assert_eq!(Endpoint::Pass(9).path(), "game/9/pass");
        assert_eq!(Endpoint::AcceptInvite(5).to_string(), "invite/5/accept");
        assert!(Endpoint::LoginId.is_login());
        assert!(!Endpoint::CreateUser.is_login());
    }

    #[test]
    fn decodes_success_envelope() {
        let envelope = Envelope::from_body(r#"{"status":"success","content":{"id":42}}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.content, json!({"id": 42}));
    }

    #[test]
    fn missing_content_decodes_as_null() {
        let envelope = Envelope::from_body(r#"{"status":"success"}"#).unwrap();
        assert_eq!(envelope.content, Value::Null);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            Envelope::from_body("[1, 2]"),
            Err(EnvelopeError::NotAnObject)
        ));
        assert!(matches!(
            Envelope::from_body("<html>"),
            Err(EnvelopeError::InvalidJson(_))
        ));
        assert!(matches!(
            Envelope::from_body(r#"{"content":{}}"#),
            Err(EnvelopeError::MissingStatus)
        ));
        assert!(matches!(
            Envelope::from_body(r#"{"status":1}"#),
            Err(EnvelopeError::MissingStatus)
        ));
    }

    #[test]
    fn rejection_reads_content_type() {
        let envelope =
            Envelope::from_body(r#"{"status":"error","content":{"type":"game_over"}}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.rejection(), Rejection::GameOver);
        assert_eq!(envelope.rejection(), "game_over");
    }

    #[test]
    fn unknown_rejections_round_trip() {
        let envelope =
            Envelope::from_body(r#"{"status":"error","content":{"type":"tile_gremlins"}}"#)
                .unwrap();
        assert_eq!(envelope.rejection(), Rejection::Other("tile_gremlins".into()));
        assert_eq!(envelope.rejection().to_string(), "tile_gremlins");
    }

    #[test]
    fn rejection_falls_back_to_status() {
        let envelope = Envelope::from_body(r#"{"status":"error","content":"boom"}"#).unwrap();
        assert_eq!(envelope.rejection(), "error");
    }

    #[test]
    fn take_field_reports_missing_fields() {
        let mut envelope = Envelope::success(json!({"games": [1, 2]}));
        assert_eq!(envelope.take_field("games").unwrap(), json!([1, 2]));
        assert!(matches!(
            envelope.take_field("games"),
            Err(EnvelopeError::MissingField("games"))
        ));
    }
}
