use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeTuple};
use thiserror::Error;

/// Rule variant of a game: tile distribution, letter scores and dictionary.
///
/// Sent to the server as its integer code.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Ruleset {
    #[default]
    American,
    Norwegian,
    Dutch,
    Danish,
    Swedish,
    English,
    Spanish,
    French,
}

impl Ruleset {
    pub const ALL: [Ruleset; 8] = [
        Ruleset::American,
        Ruleset::Norwegian,
        Ruleset::Dutch,
        Ruleset::Danish,
        Ruleset::Swedish,
        Ruleset::English,
        Ruleset::Spanish,
        Ruleset::French,
    ];

    pub fn code(self) -> u8 {
        match self {
            Ruleset::American => 0,
            Ruleset::Norwegian => 1,
            Ruleset::Dutch => 2,
            Ruleset::Danish => 3,
            Ruleset::Swedish => 4,
            Ruleset::English => 5,
            Ruleset::Spanish => 6,
            Ruleset::French => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ruleset::American => "american",
            Ruleset::Norwegian => "norwegian",
            Ruleset::Dutch => "dutch",
            Ruleset::Danish => "danish",
            Ruleset::Swedish => "swedish",
            Ruleset::English => "english",
            Ruleset::Spanish => "spanish",
            Ruleset::French => "french",
        }
    }
}

impl From<Ruleset> for u8 {
    fn from(ruleset: Ruleset) -> Self {
        ruleset.code()
    }
}

impl TryFrom<u8> for Ruleset {
    type Error = UnknownVariant;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ruleset::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| UnknownVariant::new("ruleset", code))
    }
}

impl FromStr for Ruleset {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Ruleset::try_from(code);
        }
        Ruleset::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("ruleset", s))
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board layout chosen when a game is created.
///
/// Unlike [`Ruleset`], the server expects the lowercase name, not the code.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    Normal,
    #[default]
    Random,
}

impl BoardType {
    pub fn code(self) -> u8 {
        match self {
            BoardType::Normal => 0,
            BoardType::Random => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardType::Normal => "normal",
            BoardType::Random => "random",
        }
    }
}

impl TryFrom<u8> for BoardType {
    type Error = UnknownVariant;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BoardType::Normal),
            1 => Ok(BoardType::Random),
            other => Err(UnknownVariant::new("board type", other)),
        }
    }
}

impl FromStr for BoardType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return BoardType::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(BoardType::Normal),
            "random" => Ok(BoardType::Random),
            _ => Err(UnknownVariant::new("board type", s)),
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: impl fmt::Display) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// An identifier argument that could not be read as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier {0:?}: expected an integer")]
pub struct InvalidId(pub String);

/// Coercion of caller-supplied identifiers into the integer form interpolated
/// into request paths and payloads.
///
/// Numeric strings are accepted so that `42` and `"42"` produce identical
/// requests.
pub trait IntoId {
    fn into_id(self) -> Result<i64, InvalidId>;
}

macro_rules! impl_into_id_lossless {
    ($($ty:ty),*) => {
        $(impl IntoId for $ty {
            fn into_id(self) -> Result<i64, InvalidId> {
                Ok(i64::from(self))
            }
        })*
    };
}

macro_rules! impl_into_id_checked {
    ($($ty:ty),*) => {
        $(impl IntoId for $ty {
            fn into_id(self) -> Result<i64, InvalidId> {
                i64::try_from(self).map_err(|_| InvalidId(self.to_string()))
            }
        })*
    };
}

impl_into_id_lossless!(i8, i16, i32, i64, u8, u16, u32);
impl_into_id_checked!(u64, usize, isize);

impl IntoId for &str {
    fn into_id(self) -> Result<i64, InvalidId> {
        self.trim()
            .parse::<i64>()
            .map_err(|_| InvalidId(self.to_string()))
    }
}

impl IntoId for String {
    fn into_id(self) -> Result<i64, InvalidId> {
        self.as_str().into_id()
    }
}

impl IntoId for &String {
    fn into_id(self) -> Result<i64, InvalidId> {
        self.as_str().into_id()
    }
}

/// A tile laid down as part of a move.
///
/// Serialized as the array `[x, y, letter, wildcard]` the move endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    pub x: u8,
    pub y: u8,
    pub letter: String,
    pub wildcard: bool,
}

impl PlacedTile {
    pub fn new(x: u8, y: u8, letter: impl Into<String>) -> Self {
        Self {
            x,
            y,
            letter: letter.into(),
            wildcard: false,
        }
    }

    /// A blank tile played as `letter`.
    pub fn wildcard(x: u8, y: u8, letter: impl Into<String>) -> Self {
        Self {
            wildcard: true,
            ..Self::new(x, y, letter)
        }
    }
}

impl Serialize for PlacedTile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.serialize_element(&self.letter)?;
        tuple.serialize_element(&self.wildcard)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for PlacedTile {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y, letter, wildcard) = <(u8, u8, String, bool)>::deserialize(deserializer)?;
        Ok(Self {
            x,
            y,
            letter,
            wildcard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ruleset_codes_are_stable() {
        let codes: Vec<u8> = Ruleset::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes, (0..8).collect::<Vec<u8>>());
        assert_eq!(Ruleset::try_from(5u8), Ok(Ruleset::English));
        assert!(Ruleset::try_from(8u8).is_err());
    }

    #[test]
    fn ruleset_serializes_as_integer() {
        assert_eq!(serde_json::to_value(Ruleset::Swedish).unwrap(), json!(4));
        let back: Ruleset = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(back, Ruleset::Dutch);
        assert!(serde_json::from_value::<Ruleset>(json!(9)).is_err());
    }

    #[test]
    fn ruleset_parses_name_or_code() {
        assert_eq!("French".parse::<Ruleset>(), Ok(Ruleset::French));
        assert_eq!(" 1 ".parse::<Ruleset>(), Ok(Ruleset::Norwegian));
        assert!("klingon".parse::<Ruleset>().is_err());
    }

    #[test]
    fn board_type_serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_value(BoardType::Normal).unwrap(), json!("normal"));
        assert_eq!(serde_json::to_value(BoardType::Random).unwrap(), json!("random"));
        assert_eq!(BoardType::Normal.code(), 0);
        assert_eq!(BoardType::Random.code(), 1);
        assert_eq!(BoardType::default(), BoardType::Random);
        assert_eq!(BoardType::try_from(0u8), Ok(BoardType::Normal));
        assert_eq!(" 1".parse::<BoardType>(), Ok(BoardType::Random));
        assert_eq!("Normal".parse::<BoardType>(), Ok(BoardType::Normal));
        assert!("2".parse::<BoardType>().is_err());
    }

    #[test]
    fn ids_coerce_from_integers_and_numeric_strings() {
        assert_eq!(42u32.into_id(), Ok(42));
        assert_eq!("42".into_id(), Ok(42));
        assert_eq!(" 42\n".into_id(), Ok(42));
        assert_eq!(String::from("-7").into_id(), Ok(-7));
        assert_eq!("+9".into_id(), Ok(9));
    }

    #[test]
    fn ids_reject_non_integers() {
        assert_eq!("4.2".into_id(), Err(InvalidId("4.2".into())));
        assert!("abc".into_id().is_err());
        assert!("".into_id().is_err());
        assert!(u64::MAX.into_id().is_err());
    }

    #[test]
    fn placed_tile_wire_format() {
        let tiles = vec![PlacedTile::new(7, 7, "C"), PlacedTile::wildcard(8, 7, "A")];
        assert_eq!(
            serde_json::to_value(&tiles).unwrap(),
            json!([[7, 7, "C", false], [8, 7, "A", true]])
        );
        let parsed: PlacedTile = serde_json::from_value(json!([1, 2, "Q", false])).unwrap();
        assert_eq!(parsed, PlacedTile::new(1, 2, "Q"));
    }
}
