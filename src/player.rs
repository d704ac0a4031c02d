//! Player records
//!
//! A `Player` is what the store holds and what the API returns. A `NewPlayer`
//! is the client supplied part of a player; the store fills in the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned player identifier
pub type PlayerId = u64;

/// A stored player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub text: String,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Player {
    /// Check whether the player carries the given tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Body of a create request.
///
/// Only a JSON object decodes into it. `id` and `created` are not part of
/// it: unknown fields are ignored, so a client sending them has no effect on
/// the stored record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct NewPlayer {
    pub text: String,
    pub tags: Vec<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub age: Option<u32>,
}

/// Field layout of the create body
#[derive(Deserialize)]
struct NewPlayerFields {
    #[serde(default, alias = "name")]
    text: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    age: Option<u32>,
}

impl TryFrom<Map<String, Value>> for NewPlayer {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: NewPlayerFields = serde_json::from_value(Value::Object(object))?;
        Ok(NewPlayer {
            text: fields.text,
            tags: fields.tags,
            team: fields.team,
            position: fields.position,
            age: fields.age,
        })
    }
}

impl NewPlayer {
    pub fn new(text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tags,
            ..Default::default()
        }
    }

    /// Turn the payload into a stored record with server-assigned fields
    pub fn into_player(self, id: PlayerId, created: DateTime<Utc>) -> Player {
        Player {
            id,
            text: self.text,
            tags: self.tags,
            created,
            team: self.team,
            position: self.position,
            age: self.age,
        }
    }
}
