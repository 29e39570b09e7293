//! JSON bodies sent to the API. Passwords in here are already digested.

use serde::Serialize;

use crate::models::{BoardType, PlacedTile, Ruleset};

#[derive(Debug, Serialize)]
pub struct LoginEmail<'a> {
    pub email: &'a str,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginId {
    pub id: i64,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SearchUser<'a> {
    pub username_or_email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateRelationship {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: i64,
}

#[derive(Debug, Serialize)]
pub struct RandomRequest {
    pub ruleset: Ruleset,
    pub board_type: BoardType,
}

#[derive(Debug, Serialize)]
pub struct UploadAvatar<'a> {
    pub image_data: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Move<'a> {
    #[serde(rename = "move")]
    pub tiles: &'a [PlacedTile],
    pub ruleset: Ruleset,
    pub words: [&'a str; 1],
}

#[derive(Debug, Serialize)]
pub struct Invite<'a> {
    pub invitee: &'a str,
    pub ruleset: Ruleset,
    pub board_type: BoardType,
}

#[derive(Debug, Serialize)]
pub struct SetPassword {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn random_request_mixes_integer_and_string_enums() {
        let body = RandomRequest {
            ruleset: Ruleset::Danish,
            board_type: BoardType::Normal,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"ruleset": 3, "board_type": "normal"})
        );
    }

    #[test]
    fn move_wraps_the_word_in_a_list() {
        let tiles = [PlacedTile::new(7, 7, "H"), PlacedTile::new(8, 7, "I")];
        let body = Move {
            tiles: &tiles,
            ruleset: Ruleset::English,
            words: ["HI"],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "move": [[7, 7, "H", false], [8, 7, "I", false]],
                "ruleset": 5,
                "words": ["HI"],
            })
        );
    }

    #[test]
    fn relationship_kind_is_sent_as_type() {
        let body = CreateRelationship { id: 11, kind: 0 };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"id": 11, "type": 0})
        );
    }
}
