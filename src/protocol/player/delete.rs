use async_trait::async_trait;
use axum::http::StatusCode;
use tracing::info;

use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::store::PlayerStore;

/// DELETE on an item
pub struct DeletePlayerCmd;

#[async_trait]
impl Handler for DeletePlayerCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let id = request.target.player_id()?;
        store.delete_player(id)?;
        info!("Deleted player {}", id);
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }
}

/// DELETE on the collection
pub struct DeletePlayersCmd;

#[async_trait]
impl Handler for DeletePlayersCmd {
    async fn handle(&self, _request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        store.delete_players();
        info!("Deleted all players");
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }
}
