use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use storage::models::Player;

use crate::error::{LoaderError, Result};

#[derive(Debug, Deserialize)]
struct InputDocument {
    #[serde(default)]
    players: Vec<Value>,
}

/// One player entry as it appears in the input file: identity at the top
/// level, measures and match history under `data`, country under `country`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub shortname: String,
    pub sex: String,
    pub picture: String,
    pub data: PlayerData,
    pub country: CountryRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerData {
    pub rank: i32,
    pub points: i32,
    pub weight: i32,
    pub height: i32,
    pub age: i32,
    pub last: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRef {
    pub code: String,
    pub picture: String,
}

/// Read an input file and return its `players` entries, undecoded.
///
/// The document must be a JSON object; a missing `players` key yields an
/// empty list. Entries stay raw `Value`s so that a broken record surfaces
/// as a record error for its index, not as a document parse error.
pub fn read_players_file(path: &Path) -> Result<Vec<Value>> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_players(&contents)
}

fn parse_players(contents: &str) -> Result<Vec<Value>> {
    let document: InputDocument = serde_json::from_str(contents)?;

    Ok(document.players)
}

impl PlayerRecord {
    /// Decode one raw entry, attributing failures to its position in the
    /// input list.
    pub fn decode(index: usize, value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|source| LoaderError::Record { index, source })
    }

    /// Flatten the nested record into the column layout of the table.
    pub fn into_row(self) -> Player {
        Player {
            id: self.id,
            firstname: self.firstname,
            lastname: self.lastname,
            shortname: self.shortname,
            sex: self.sex,
            rank: self.data.rank,
            points: self.data.points,
            weight: self.data.weight,
            height: self.data.height,
            age: self.data.age,
            last: self.data.last,
            countrycode: self.country.code,
            countrypicture: self.country.picture,
            picture: self.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DJOKOVIC: &str = r#"{
        "players": [
            {
                "id": 1,
                "firstname": "Novak",
                "lastname": "Djokovic",
                "shortname": "djokovic",
                "sex": "M",
                "picture": "http://x/1.png",
                "data": {
                    "rank": 1,
                    "points": 12000,
                    "weight": 80000,
                    "height": 188,
                    "age": 36,
                    "last": [1, 1, 0, 1, 1]
                },
                "country": {
                    "code": "SRB",
                    "picture": "http://x/srb.png"
                }
            }
        ]
    }"#;

    #[test]
    fn test_decodes_full_record() {
        let players = parse_players(DJOKOVIC).unwrap();
        assert_eq!(players.len(), 1);

        let record = PlayerRecord::decode(0, &players[0]).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.shortname, "djokovic");
        assert_eq!(record.sex, "M");
        assert_eq!(record.data.rank, 1);
        assert_eq!(record.data.last, vec![1, 1, 0, 1, 1]);
        assert_eq!(record.country.code, "SRB");
    }

    #[test]
    fn test_flattens_record_into_row() {
        let players = parse_players(DJOKOVIC).unwrap();
        let row = PlayerRecord::decode(0, &players[0]).unwrap().into_row();

        assert_eq!(row.id, 1);
        assert_eq!(row.countrycode, "SRB");
        assert_eq!(row.countrypicture, "http://x/srb.png");
        assert_eq!(row.picture, "http://x/1.png");
        assert_eq!(row.weight, 80000);
        assert_eq!(row.last, vec![1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_empty_players_list() {
        let players = parse_players(r#"{"players": []}"#).unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn test_missing_players_key_yields_empty_list() {
        let players = parse_players("{}").unwrap();
        assert!(players.is_empty());

        let players = parse_players(r#"{"tournaments": []}"#).unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_players(r#"{"players": ["#).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn test_non_object_top_level_is_a_parse_error() {
        let err = parse_players("[]").unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn test_missing_field_is_a_record_error() {
        let document = r#"{
            "players": [
                {
                    "id": 7,
                    "firstname": "A",
                    "lastname": "B",
                    "shortname": "ab",
                    "sex": "F",
                    "picture": "http://x/7.png",
                    "data": {
                        "points": 300,
                        "weight": 60000,
                        "height": 170,
                        "age": 25,
                        "last": [0, 1]
                    },
                    "country": {"code": "FRA", "picture": "http://x/fra.png"}
                }
            ]
        }"#;

        let players = parse_players(document).unwrap();
        let err = PlayerRecord::decode(0, &players[0]).unwrap_err();

        match err {
            LoaderError::Record { index, source } => {
                assert_eq!(index, 0);
                assert!(source.to_string().contains("rank"));
            }
            other => panic!("expected a record error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let document = DJOKOVIC.replace(
            r#""id": 1,"#,
            r#""id": 1, "nickname": "Nole", "coach": null,"#,
        );

        let players = parse_players(&document).unwrap();
        let record = PlayerRecord::decode(0, &players[0]).unwrap();
        assert_eq!(record.id, 1);
    }
}
