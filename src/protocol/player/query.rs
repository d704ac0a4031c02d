use async_trait::async_trait;
use axum::http::StatusCode;

use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::store::PlayerStore;

/// GET /tag/{tag}
pub struct ByTagCmd;

#[async_trait]
impl Handler for ByTagCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let tag = request.target.tag()?;
        Reply::json(StatusCode::OK, &store.get_players_by_tag(tag))
    }
}

/// GET /created/{timestamp}
pub struct ByCreatedCmd;

#[async_trait]
impl Handler for ByCreatedCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let created = request.target.created()?;
        Reply::json(StatusCode::OK, &store.get_players_by_created(created))
    }
}
