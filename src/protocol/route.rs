//! Request routing
//!
//! Resolution is split in two pure steps: the path is parsed into a `Target`
//! (which resource, with its parameters), then the route table picks the
//! operation for the request method. Neither step touches the transport or
//! the store.

use axum::http::Method;
use chrono::{DateTime, Utc};

use super::error::ApiError;
use crate::player::PlayerId;

/// Collection segments accepted for the player resource
const PLAYER_ROOTS: [&str; 2] = ["player", "players"];

/// Item segment reserved for the random pick. Checked before ID parsing.
const RANDOM_SEGMENT: &str = "random";

/// Operations the API can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreatePlayer,
    GetAllPlayers,
    DeletePlayers,
    GetPlayer,
    DeletePlayer,
    RandomPlayer,
    PlayersByTag,
    PlayersByCreated,
    AdminPortal,
}

/// Shape of a path, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Collection,
    Item,
    Random,
    Tag,
    Created,
    Admin,
}

/// A parsed path: the addressed resource plus its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// `/player` or `/players`
    Collection,
    /// `/player/{id}`
    Item(PlayerId),
    /// `/player/random`; keeps the collection segment used by the request
    Random { root: &'static str },
    /// `/tag/{tag}`
    Tag(String),
    /// `/created/{timestamp}`
    Created(DateTime<Utc>),
    /// `/admin`
    Admin,
}

/// One line of the route table
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub method: &'static str,
    pub pattern: Pattern,
    pub operation: Operation,
}

const fn entry(method: &'static str, pattern: Pattern, operation: Operation) -> RouteEntry {
    RouteEntry {
        method,
        pattern,
        operation,
    }
}

/// (method, path pattern) -> operation
pub const ROUTES: &[RouteEntry] = &[
    entry("POST", Pattern::Collection, Operation::CreatePlayer),
    entry("GET", Pattern::Collection, Operation::GetAllPlayers),
    entry("DELETE", Pattern::Collection, Operation::DeletePlayers),
    entry("GET", Pattern::Item, Operation::GetPlayer),
    entry("DELETE", Pattern::Item, Operation::DeletePlayer),
    entry("GET", Pattern::Random, Operation::RandomPlayer),
    entry("GET", Pattern::Tag, Operation::PlayersByTag),
    entry("GET", Pattern::Created, Operation::PlayersByCreated),
    entry("GET", Pattern::Admin, Operation::AdminPortal),
];

/// A resolved request: what to do, and on which target
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub operation: Operation,
    pub target: Target,
}

impl Route {
    /// Resolve a request method and URL path into a route
    pub fn resolve(method: &Method, path: &str) -> Result<Self, ApiError> {
        let target = Target::parse(path)?;
        let pattern = target.pattern();

        let mut allowed = Vec::new();
        for entry in ROUTES.iter().filter(|e| e.pattern == pattern) {
            if entry.method == method.as_str() {
                return Ok(Route {
                    operation: entry.operation,
                    target,
                });
            }
            allowed.push(entry.method);
        }
        Err(ApiError::MethodNotAllowed(allowed))
    }
}

impl Target {
    pub fn pattern(&self) -> Pattern {
        match self {
            Target::Collection => Pattern::Collection,
            Target::Item(_) => Pattern::Item,
            Target::Random { .. } => Pattern::Random,
            Target::Tag(_) => Pattern::Tag,
            Target::Created(_) => Pattern::Created,
            Target::Admin => Pattern::Admin,
        }
    }

    /// Parse a (still percent-encoded) URL path
    pub fn parse(path: &str) -> Result<Self, ApiError> {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let Some((first, rest)) = segments.split_first() else {
            return Err(ApiError::not_found("no resource at /"));
        };

        if let Some(root) = player_root(first) {
            return Self::parse_player(root, rest);
        }

        match *first {
            "tag" => Ok(Target::Tag(single_param("tag", rest)?)),
            "created" => {
                let raw = single_param("created", rest)?;
                let created = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| ApiError::bad_request(format!("invalid timestamp `{}`: {}", raw, e)))?;
                Ok(Target::Created(created.with_timezone(&Utc)))
            }
            "admin" if rest.is_empty() => Ok(Target::Admin),
            _ => Err(ApiError::not_found(format!("no resource at {}", path))),
        }
    }

    fn parse_player(root: &'static str, rest: &[&str]) -> Result<Self, ApiError> {
        match rest {
            [] => Ok(Target::Collection),
            [segment] if *segment == RANDOM_SEGMENT => Ok(Target::Random { root }),
            [segment] => segment
                .parse::<PlayerId>()
                .map(Target::Item)
                .map_err(|e| ApiError::bad_request(format!("invalid player id `{}`: {}", segment, e))),
            _ => Err(ApiError::bad_request(format!("expect /{}/<id>", root))),
        }
    }

    /// The player ID of an item target
    pub fn player_id(&self) -> Result<PlayerId, ApiError> {
        match self {
            Target::Item(id) => Ok(*id),
            _ => Err(ApiError::bad_request("expect a player id in the path")),
        }
    }

    pub fn tag(&self) -> Result<&str, ApiError> {
        match self {
            Target::Tag(tag) => Ok(tag),
            _ => Err(ApiError::bad_request("expect /tag/<tag>")),
        }
    }

    pub fn created(&self) -> Result<DateTime<Utc>, ApiError> {
        match self {
            Target::Created(created) => Ok(*created),
            _ => Err(ApiError::bad_request("expect /created/<timestamp>")),
        }
    }
}

/// Path of a single player under `root`, or under the canonical
/// `/player` collection when no root is given
pub fn item_path(root: Option<&str>, id: PlayerId) -> String {
    format!("/{}/{}", root.unwrap_or(PLAYER_ROOTS[0]), id)
}

fn player_root(segment: &str) -> Option<&'static str> {
    PLAYER_ROOTS.iter().copied().find(|root| *root == segment)
}

/// Exactly one non-empty, percent-decoded parameter after `name`
fn single_param(name: &str, rest: &[&str]) -> Result<String, ApiError> {
    match rest {
        [raw] if !raw.is_empty() => urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .map_err(|e| ApiError::bad_request(format!("invalid {} `{}`: {}", name, raw, e))),
        _ => Err(ApiError::bad_request(format!("expect /{}/<{}>", name, name))),
    }
}
